//! CLI application for talking to a Hue bridge.
//!
//! This example demonstrates a command-line interface built on the
//! [`Command`] trait, covering pairing, listing lights and changing state.
//!
//! Run with: cargo run --example hue_cli -- --help

use clap::{Parser, Subcommand};
use hue_bridge_rs::{
    AdapterKind, BridgeConfig, BridgeErrorKind, Client, Color, Command, Error, Method,
};
use serde_json::{Value, json};

#[derive(Parser)]
#[command(name = "hue-cli")]
#[command(about = "Control Hue lights through the bridge from the command line", long_about = None)]
struct Cli {
    /// Host name or IP address of the bridge
    #[arg(short = 'H', long, global = true, default_value = "192.168.1.2")]
    host: String,

    /// Whitelisted username (omit for unauthenticated calls)
    #[arg(short, long, global = true)]
    username: Option<String>,

    /// HTTP backend to use: reqwest or streaming
    #[arg(short, long, global = true)]
    adapter: Option<AdapterKind>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the bridge configuration
    Config,

    /// List all lights known to the bridge
    Lights,

    /// Create a username (press the link button on the bridge first)
    Pair {
        /// Device type reported to the bridge
        #[arg(short, long, default_value = "hue_cli#rust")]
        devicetype: String,
    },

    /// Turn a light on
    On {
        /// Light ID
        light: u32,
    },

    /// Turn a light off
    Off {
        /// Light ID
        light: u32,
    },

    /// Set RGB color (0-255 for each component)
    Color {
        /// Light ID
        light: u32,
        /// Red component (0-255)
        red: u8,
        /// Green component (0-255)
        green: u8,
        /// Blue component (0-255)
        blue: u8,
    },
}

struct GetConfig;

impl Command for GetConfig {
    type Output = Value;

    fn send(&self, client: &mut Client) -> Result<Value, Error> {
        let path = client.api_path("/config");
        client.transport_mut().send_request(&path, Method::Get, None)
    }
}

struct GetLights;

impl Command for GetLights {
    type Output = Value;

    fn send(&self, client: &mut Client) -> Result<Value, Error> {
        let path = client.api_path("/lights");
        client
            .transport_mut()
            .send_request_bypass_body_validation(&path, Method::Get, None)
    }
}

struct CreateUser {
    devicetype: String,
}

impl Command for CreateUser {
    type Output = Option<String>;

    fn send(&self, client: &mut Client) -> Result<Option<String>, Error> {
        let body = json!({ "devicetype": self.devicetype });
        let result = client
            .transport_mut()
            .send_request("/api", Method::Post, Some(&body))?;
        Ok(result["username"].as_str().map(str::to_string))
    }
}

struct SetState {
    light: u32,
    state: Value,
}

impl Command for SetState {
    type Output = Value;

    fn send(&self, client: &mut Client) -> Result<Value, Error> {
        let path = client.api_path(&format!("/lights/{}/state", self.light));
        client
            .transport_mut()
            .send_request(&path, Method::Put, Some(&self.state))
    }
}

fn set_power(client: &mut Client, light: u32, on: bool) {
    println!("Turning light {} {}...", light, if on { "ON" } else { "OFF" });
    let command = SetState {
        light,
        state: json!({ "on": on }),
    };
    match client.send_command(&command) {
        Ok(_) => println!("Done"),
        Err(e) => eprintln!("Error: {}", e),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = BridgeConfig::new(&cli.host);
    if let Some(username) = &cli.username {
        config = config.with_username(username);
    }
    if let Some(adapter) = cli.adapter {
        config = config.with_adapter(adapter);
    }
    let mut client = Client::from_config(&config);

    match cli.command {
        Commands::Config => {
            println!("Getting configuration from bridge at {}...", cli.host);
            let result = client.send_command(&GetConfig)?;
            println!("\n{}", serde_json::to_string_pretty(&result)?);
        }

        Commands::Lights => {
            println!("Listing lights on bridge at {}...", cli.host);
            let lights = client.send_command(&GetLights)?;
            match lights.as_object() {
                Some(lights) if !lights.is_empty() => {
                    println!("\nFound {} light(s):", lights.len());
                    for (id, light) in lights {
                        let name = light["name"].as_str().unwrap_or("?");
                        let on = light["state"]["on"].as_bool().unwrap_or(false);
                        println!("  {:>3}  {:30}  {}", id, name, if on { "ON" } else { "OFF" });
                    }
                }
                _ => println!("No lights found."),
            }
        }

        Commands::Pair { devicetype } => {
            println!("Pairing with bridge at {} as '{}'...", cli.host, devicetype);
            match client.send_command(&CreateUser { devicetype }) {
                Ok(Some(username)) => println!("Paired. Username: {}", username),
                Ok(None) => eprintln!("Bridge accepted the request but returned no username"),
                Err(e) if e.bridge_kind() == Some(BridgeErrorKind::LinkButton) => {
                    eprintln!("Press the link button on the bridge and try again.")
                }
                Err(e) => eprintln!("Error: {}", e),
            }
        }

        Commands::On { light } => set_power(&mut client, light, true),

        Commands::Off { light } => set_power(&mut client, light, false),

        Commands::Color {
            light,
            red,
            green,
            blue,
        } => {
            let xy = Color::rgb(red, green, blue).to_xy();
            println!(
                "Setting light {} to RGB({}, {}, {}) -> xy({:.4}, {:.4}) bri {}...",
                light,
                red,
                green,
                blue,
                xy.x(),
                xy.y(),
                xy.brightness()
            );
            let command = SetState {
                light,
                state: json!({ "on": true, "xy": [xy.x(), xy.y()], "bri": xy.brightness() }),
            };
            match client.send_command(&command) {
                Ok(_) => println!("Color set successfully"),
                Err(e) => eprintln!("Error: {}", e),
            }
        }
    }

    Ok(())
}
