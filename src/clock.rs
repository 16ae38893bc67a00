//! The shared animation clock.
//!
//! Every periodic effect in the application subscribes to this single clock
//! instead of owning a timer, so the total scheduling overhead is one interval
//! regardless of how many effects are mounted. The main event loop decides
//! when a tick is due and calls [`Clock::tick`]; everything downstream is a
//! pure function of the tick counter.

use anyhow::Result;

/// One discrete unit of the shared animation clock.
pub type Tick = u64;

/// Identifies a registered tick handler so it can be removed later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u32);

type TickHandler<C> = Box<dyn FnMut(&mut C, Tick) -> Result<()>>;

/// Process-wide tick source.
///
/// Generic over a context type `C` so handlers can mutate the animated world
/// without the clock owning it. Handlers run in registration order; a handler
/// that fails is logged and skipped for that tick, never unsubscribed, and
/// never prevents delivery to the handlers after it.
pub struct Clock<C> {
    tick: Tick,
    running: bool,
    next_handler: u32,
    handlers: Vec<(HandlerId, TickHandler<C>)>,
}

impl<C> Clock<C> {
    pub fn new() -> Self {
        Self {
            tick: 0,
            running: false,
            next_handler: 0,
            handlers: Vec::new(),
        }
    }

    /// Begin emitting ticks. Idempotent.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Halt emission. Pending handlers are not invoked until restarted.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The value the next delivered tick will carry.
    pub fn current(&self) -> Tick {
        self.tick
    }

    /// Register a handler invoked once per tick with the current counter.
    pub fn on_tick<F>(&mut self, handler: F) -> HandlerId
    where
        F: FnMut(&mut C, Tick) -> Result<()> + 'static,
    {
        let id = HandlerId(self.next_handler);
        self.next_handler += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Remove a handler. Unknown ids are ignored.
    pub fn remove(&mut self, id: HandlerId) {
        self.handlers.retain(|(h, _)| *h != id);
    }

    /// Advance the counter by one and deliver it to every handler in
    /// registration order. Returns the delivered tick, or `None` when the
    /// clock is stopped.
    pub fn tick(&mut self, ctx: &mut C) -> Option<Tick> {
        if !self.running {
            return None;
        }
        let tick = self.tick;
        for (id, handler) in &mut self.handlers {
            if let Err(err) = handler(ctx, tick) {
                tracing::warn!("tick handler {:?} failed at tick {}: {:#}", id, tick, err);
            }
        }
        self.tick += 1;
        Some(tick)
    }
}

impl<C> Default for Clock<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_stopped_clock_delivers_nothing() {
        let mut clock: Clock<Vec<Tick>> = Clock::new();
        let mut seen = Vec::new();
        clock.on_tick(|ctx: &mut Vec<Tick>, t| {
            ctx.push(t);
            Ok(())
        });
        assert_eq!(clock.tick(&mut seen), None);
        assert!(seen.is_empty());
    }

    #[test]
    fn test_handlers_run_in_registration_order() {
        let mut clock: Clock<Vec<&'static str>> = Clock::new();
        clock.on_tick(|ctx: &mut Vec<&'static str>, _| {
            ctx.push("first");
            Ok(())
        });
        clock.on_tick(|ctx: &mut Vec<&'static str>, _| {
            ctx.push("second");
            Ok(())
        });

        let mut order = Vec::new();
        clock.start();
        clock.tick(&mut order);
        assert_eq!(order, vec!["first", "second"]);
    }

    #[test]
    fn test_failing_handler_does_not_stop_delivery() {
        let mut clock: Clock<u32> = Clock::new();
        clock.on_tick(|_, _| anyhow::bail!("boom"));
        clock.on_tick(|ctx: &mut u32, _| {
            *ctx += 1;
            Ok(())
        });

        let mut delivered = 0u32;
        clock.start();
        clock.tick(&mut delivered);
        clock.tick(&mut delivered);
        assert_eq!(delivered, 2, "handler after the failing one must still run");
        assert_eq!(clock.current(), 2, "failures must not halt the clock");
    }

    #[test]
    fn test_removed_handler_is_skipped() {
        let counter = Rc::new(RefCell::new(0u32));
        let mut clock: Clock<()> = Clock::new();
        let c = Rc::clone(&counter);
        let id = clock.on_tick(move |_, _| {
            *c.borrow_mut() += 1;
            Ok(())
        });

        clock.start();
        clock.tick(&mut ());
        clock.remove(id);
        clock.tick(&mut ());
        assert_eq!(*counter.borrow(), 1);
    }

    #[test]
    fn test_counter_is_monotone() {
        let mut clock: Clock<Vec<Tick>> = Clock::new();
        clock.on_tick(|ctx: &mut Vec<Tick>, t| {
            ctx.push(t);
            Ok(())
        });
        let mut seen = Vec::new();
        clock.start();
        for _ in 0..5 {
            clock.tick(&mut seen);
        }
        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
    }
}
