use waitlist_api::configuration::get_configuration;
use waitlist_api::startup::Application;
use waitlist_api::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("waitlist_api".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_configuration()?;
    let application = Application::build(configuration)?;
    application.run_until_stopped().await?;
    Ok(())
}
