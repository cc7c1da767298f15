/// Binary entrypoint for the `icnsgen` executable.
///
/// Keeps the binary thin — all business logic lives in the `icnsgen_lib` crate
/// so unit tests can import library functions directly.
fn main() {
    icnsgen_lib::run();
}
