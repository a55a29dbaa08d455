use clap::Parser;
use mapnav::app::MapnavApp;

#[tokio::main]
async fn main() {
    env_logger::init();
    let args = MapnavApp::parse();
    match args.op.run().await {
        Ok(_) => log::info!("finished."),
        Err(e) => {
            log::error!("failed running mapnav: {e}");
            std::process::exit(1);
        }
    }
}
