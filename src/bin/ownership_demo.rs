//! Walks through exclusive, shared and weak ownership of a tracked value.

use robot_idioms::{ExclusiveHolder, LifecycleLog, Result, SharedHolder, Tracked, telemetry};

fn main() -> Result<()> {
    telemetry::init();
    let log = LifecycleLog::new();

    // Exclusive ownership
    {
        let mut u1 = ExclusiveHolder::new(Tracked::new(1, &log));
        let u2 = u1.transfer();
        println!("exclusive holder owns Demo({})", u2.get()?.value);
        println!("moved-from holder is empty = {}", u1.is_empty());
    }

    // Shared ownership
    {
        let s1 = SharedHolder::new(Tracked::new(2, &log));
        let _s2 = s1.clone();
        println!("shared holder use_count = {}", s1.use_count());
    }

    // Weak observer
    {
        let mut s3 = SharedHolder::new(Tracked::new(3, &log));
        let w = s3.downgrade();
        println!("shared holder use_count = {}", s3.use_count());
        if let Some(sp) = w.lock() {
            println!("Accessing Demo(3): {}", sp.get()?.value);
        }
        s3.reset();
        println!("After reset, weak observer expired = {}", w.expired());
    }

    println!("tracked values still alive: {}", log.live());
    Ok(())
}
