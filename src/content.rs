//! Static page content: the five sections and the data they present.
//!
//! Copy lives here as plain data so the rendering layer stays free of
//! hard-coded strings and the console can answer from the same source.

/// The five anchors of the page, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Section {
    Hero,
    About,
    Skills,
    Projects,
    Contact,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Hero,
        Section::About,
        Section::Skills,
        Section::Projects,
        Section::Contact,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Section::Hero => "Home",
            Section::About => "About Me",
            Section::Skills => "Skills",
            Section::Projects => "Projects",
            Section::Contact => "Contact Me",
        }
    }

    /// Anchor name used by `goto` and the shortcut help.
    pub fn anchor(self) -> &'static str {
        match self {
            Section::Hero => "home",
            Section::About => "about",
            Section::Skills => "skills",
            Section::Projects => "projects",
            Section::Contact => "contact",
        }
    }

    pub fn from_anchor(anchor: &str) -> Option<Section> {
        Section::ALL.iter().copied().find(|s| s.anchor() == anchor)
    }

    /// Single-character navigation shortcut.
    pub fn shortcut(self) -> char {
        match self {
            Section::Hero => 'h',
            Section::About => 'a',
            Section::Skills => 's',
            Section::Projects => 'p',
            Section::Contact => 'c',
        }
    }
}

pub struct SkillGroup {
    pub title: &'static str,
    /// Name and proficiency in percent.
    pub skills: &'static [(&'static str, u8)],
}

pub struct Project {
    pub name: &'static str,
    pub description: &'static str,
    pub stack: &'static [&'static str],
}

pub struct ContactInfo {
    pub email: &'static str,
    pub github: &'static str,
    pub location: &'static str,
}

pub struct Portfolio {
    pub name: &'static str,
    pub greeting: &'static str,
    pub roles: &'static [&'static str],
    pub tagline: &'static str,
    pub about: &'static [&'static str],
    pub skills: &'static [SkillGroup],
    pub projects: &'static [Project],
    pub contact: ContactInfo,
}

pub static PORTFOLIO: Portfolio = Portfolio {
    name: "Sam Carter",
    greeting: "Welcome to my portfolio",
    roles: &[
        "A Systems Programmer.",
        "A Backend Developer.",
        "A CLI Tooling Enthusiast.",
        "An Open Source Contributor.",
    ],
    tagline: "Creating what you see. Calculating what you don't.",
    about: &[
        "I build fast, reliable software close to the metal: network services,",
        "developer tools and the occasional terminal toy like this one.",
        "",
        "When I'm not programming I'm reading about how other people program,",
        "or convincing friends that the terminal is a perfectly good place to",
        "host a portfolio.",
    ],
    skills: &[
        SkillGroup {
            title: "Languages",
            skills: &[("Rust", 92), ("Go", 80), ("Python", 75), ("TypeScript", 70)],
        },
        SkillGroup {
            title: "Systems",
            skills: &[("Linux", 88), ("PostgreSQL", 78), ("Docker", 74), ("AWS", 65)],
        },
        SkillGroup {
            title: "Practices",
            skills: &[("API Design", 85), ("Observability", 80), ("CI/CD", 76)],
        },
    ],
    projects: &[
        Project {
            name: "termfolio",
            description: "This site. A scroll-animated portfolio that runs in your terminal.",
            stack: &["Rust", "ratatui", "crossterm"],
        },
        Project {
            name: "relaymux",
            description: "Multiplexing reverse proxy with hot-reloaded routing tables.",
            stack: &["Rust", "tokio", "serde"],
        },
        Project {
            name: "shelfdb",
            description: "Embedded key-value store with a log-structured backend.",
            stack: &["Rust", "memmap2"],
        },
    ],
    contact: ContactInfo {
        email: "sam@example.com",
        github: "github.com/scarter-dev",
        location: "Portland, OR",
    },
};
