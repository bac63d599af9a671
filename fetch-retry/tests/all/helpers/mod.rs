mod scripted_transport;

pub use scripted_transport::{Recorded, ScriptedTransport, SeenRequest, Step};
pub use simple_server::SimpleServer;

/// Routes engine logs to the test output; repeated calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}
