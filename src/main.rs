mod app;
mod charset;
mod errors;
mod logging;
mod options;
mod response;
mod session;
mod tui;
mod util;

use crate::options::Options;
use app::App;
use clap::Parser;
use color_eyre::eyre::Result;
use tui::Event;

async fn run(options: Options) -> Result<()> {
    let mut app = App::new(&options);
    app.detect_image_support();
    app.load_response().await;

    let mut tui = tui::Tui::new()?.tick_rate(1.0).frame_rate(30.0).mouse(true);
    tui.enter()?;
    app.set_event_tx(Some(tui.event_tx.clone()));

    loop {
        let event = tui.next().await?; // blocks until next event

        if let Event::Render = event.clone() {
            tui.draw(|f| {
                app.render(f);
            })?;
        }
        app.handle_event(event).await;
        if app.should_quit {
            break;
        }
    }
    tui.exit().await
}

#[tokio::main]
async fn main() -> Result<()> {
    tui::install_panic_hook()?;
    let options = Options::parse();
    logging::init(options.log_file.as_deref())?;
    log::info!("Viewing {}", options.response.display());
    run(options).await
}
