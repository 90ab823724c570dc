#[macro_use]
extern crate log;

use argh::FromArgs;
use smbdir::{Context, PavaoBackend, SmbCredentials, SmbOptions};

#[derive(FromArgs)]
#[argh(description = "
where positional can be: [smb://address[:port]]

Lists the entries of a directory on an SMB share")]
struct Args {
    #[argh(option, short = 'P', description = "specify password")]
    password: Option<String>,
    #[argh(option, short = 'u', description = "specify username")]
    username: String,
    #[argh(
        option,
        short = 'w',
        default = r#""WORKGROUP".to_string()"#,
        description = "specify workgroup"
    )]
    workgroup: String,
    #[argh(option, short = 's', description = "specify share")]
    share: String,
    #[argh(
        option,
        short = 'd',
        default = r#""/".to_string()"#,
        description = "directory to list, relative to the share"
    )]
    dir: String,
    #[argh(positional, description = "smb://address[:port]")]
    server: String,
}

fn main() -> anyhow::Result<()> {
    assert!(env_logger::builder().try_init().is_ok());
    let args: Args = argh::from_env();
    let password = match &args.password {
        Some(p) => p.clone(),
        None => read_secret_from_tty("Password: ")?,
    };

    info!(
        "initializing context with server {} and share {}, with username {} and workgroup {}",
        args.server, args.share, args.username, args.workgroup
    );
    let context = Context::open(
        PavaoBackend::new(),
        SmbCredentials::default()
            .server(&args.server)
            .share(&args.share)
            .username(&args.username)
            .password(password)
            .workgroup(&args.workgroup),
        SmbOptions::default()
            .one_share_per_server(true)
            .case_sensitive(false),
    )?;

    let mut dir = context.open_dir(&args.dir)?;
    info!("listing entries at {}", dir.uri());
    for entry in dir.read_entries()? {
        if entry.comment().is_empty() {
            println!("{:<14} {}", format!("{:?}", entry.get_type()), entry.name());
        } else {
            println!(
                "{:<14} {} ({})",
                format!("{:?}", entry.get_type()),
                entry.name(),
                entry.comment()
            );
        }
    }
    dir.close();

    info!("closing context...");
    context.close();
    Ok(())
}

/// Read a secret from tty with customisable prompt
fn read_secret_from_tty(prompt: &str) -> std::io::Result<String> {
    rpassword::prompt_password(prompt)
}
