//! Competition program entrypoint.

#![cfg_attr(target_os = "vexos", no_std, no_main)]

#[cfg(target_os = "vexos")]
#[vexide::main]
async fn main(peripherals: vexide::peripherals::Peripherals) {
    sixbot::v5::run(peripherals).await;
}

#[cfg(not(target_os = "vexos"))]
fn main() -> std::process::ExitCode {
    eprintln!("sixbot only runs on a V5 brain; use `cargo run --bin sim` to simulate a match");
    std::process::ExitCode::FAILURE
}
