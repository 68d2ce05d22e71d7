use std::io;

use smsc::{Auth, SmscClient};

fn env(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let login = env("SMSC_LOGIN")?;
    let password = env("SMSC_PASSWORD")?;
    let phones = env("SMSC_PHONES")?;
    let message =
        std::env::var("SMSC_MESSAGE").unwrap_or_else(|_| "Hello from the smsc demo.".to_owned());
    let sender = std::env::var("SMSC_SENDER").ok();

    let client = SmscClient::new(Auth::new(login, password)?);
    let response = client.send_text(&phones, &message, None, sender.as_deref())?;
    println!("status: {}, body: {}", response.status, response.body);

    Ok(())
}
