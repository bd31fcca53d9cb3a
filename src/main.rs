// wasm builds log through the Dioxus logger, which forwards tracing to the browser console
#[cfg(not(target_arch = "wasm32"))]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        pdfchat::config::load_env();
        init_tracing();
    }

    #[cfg(any(feature = "web", feature = "desktop", feature = "mobile"))]
    dioxus::launch(pdfchat::ui::App);

    #[cfg(not(any(feature = "web", feature = "desktop", feature = "mobile")))]
    tracing::error!("no renderer enabled; build with --features web, desktop or mobile");
}
