use std::io;

use smsc::{
    Auth, Message, MessageText, RawPhoneNumber, ResponseCost, SendDefaults, SmscClient, TimeSpec,
    TimezoneOffset,
};

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
    let password_md5 = env("SMSC_PASSWORD_MD5")?;
    let phone = RawPhoneNumber::new(env("SMSC_PHONE")?)?;

    let client = SmscClient::builder(Auth::md5(login, password_md5)?)
        .defaults(SendDefaults {
            response_cost: ResponseCost::DryRun,
            ..Default::default()
        })
        .build()?;

    let in_ten_minutes = Message::builder(vec![phone.clone()])
        .text(MessageText::new("Scheduled with a delay.")?)
        .time(TimeSpec::Delay(10))
        .build()?;
    let moscow_midnight = Message::builder(vec![phone])
        .text(MessageText::new("Scheduled by timestamp.")?)
        .time(TimeSpec::Timestamp(1_893_445_200))
        .timezone(TimezoneOffset::MOSCOW)
        .build()?;

    let messages = [in_ten_minutes, moscow_midnight];
    for (message, result) in messages.iter().zip(client.send(&messages)) {
        let time = message.time().map(|t| t.spec().encode()).unwrap_or_default();
        match result {
            Ok(response) => println!("time={time}: {}", response.body),
            Err(err) => eprintln!("time={time}: {err}"),
        }
    }

    Ok(())
}
