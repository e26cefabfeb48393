use std::net::SocketAddr;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::error;

pub const MOCK_ADDR: &str = "0.0.0.0:3003";

#[allow(unused)]
pub async fn init() {
    static ONCE_LOCK: OnceLock<()> = OnceLock::new();

    let wait = ONCE_LOCK.get().is_none();

    ONCE_LOCK.get_or_init(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            default_panic(info);
            error!("Panic occurred: {info:?}");
            std::process::exit(1);
        }));

        let _ = tracing_subscriber::fmt()
            .with_env_filter("loadsweep=debug,mock_service=debug")
            .try_init();

        // The mock service gets its own runtime on a dedicated thread so
        // it outlives whichever test runtime initialized it.
        std::thread::spawn(|| {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async {
                let addr: SocketAddr = MOCK_ADDR.parse().unwrap();
                mock_service::run(addr).await;
            });
        });
    });

    if wait {
        tokio::time::sleep(Duration::from_millis(200)).await;
    }
}
