use boomabrovers_client::{ContactFields, Dispatcher, SubmitError, SubmitState};
use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct SubmitArgs {
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value = "")]
    pub phone: String,
    #[arg(long, default_value = "")]
    pub subject: String,
    #[arg(long, default_value = "")]
    pub message: String,
}

/// Sends one submission through the configured transport, as the contact page would.
pub async fn submit(config: crate::config::Config, args: SubmitArgs) -> anyhow::Result<()> {
    let dispatcher = Dispatcher::new(config.client.transport.build());
    dispatcher.set_fields(ContactFields {
        name: args.name,
        email: args.email,
        phone: args.phone,
        subject: args.subject,
        message: args.message,
    });

    match dispatcher.submit().await {
        Ok(SubmitState::Success) => {
            println!("Thank you for your message. We will get back to you soon!");

            Ok(())
        }
        Ok(SubmitState::Error(message)) => anyhow::bail!(message),
        Ok(state) => anyhow::bail!("submission ended in unexpected state {state:?}"),
        Err(SubmitError::Invalid(errors)) => {
            for (field, message) in errors.iter() {
                eprintln!("{field}: {message}");
            }

            anyhow::bail!("{} field(s) need attention", errors.len())
        }
        Err(err) => Err(err.into()),
    }
}
