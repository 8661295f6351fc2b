use frostwheel_core::{Catalog, Engine, EventLog, SeededDraw, VirtualTimeline, WheelConfig};

fn main() {
    // Example end-to-end spin on a virtual 60fps clock
    let draw = SeededDraw::new("example-seed");
    let seed_hash = draw.seed_hash_hex();
    let mut engine = Engine::new(Catalog::winter(), WheelConfig::default(), draw);
    let mut log = EventLog::default();
    let record = VirtualTimeline::new(16.0)
        .run_spin(&mut engine, &mut log)
        .expect("idle wheel accepts a spin");
    println!(
        "seed_hash={} prize={} {} rotation={} ticks={}",
        seed_hash,
        record.prize.icon,
        record.prize.label,
        engine.state().cumulative_rotation,
        log.ticks().len()
    );
}
