#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use tilecycle::*;

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt().init();

    let mut engine = EngineBuilder::with_dimensions(480, 480)
        .title("Slow tiles".into())
        .interval(600)
        .readout(true)
        .seed(0xDEADBEEF)
        .build()?;

    engine.run();
    Ok(())
}
