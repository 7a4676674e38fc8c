//! List every light on a bridge and set them all to red.
//!
//! This example demonstrates:
//! - Reading the light list with body validation bypassed
//! - Converting an RGB color to the bridge's xy form
//! - Telling bridge errors apart from connection failures
//!
//! Run with: cargo run --example set_red -- <bridge-host> <username>

use hue_bridge_rs::{Color, Method, Transport};
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let host = args.next().ok_or("usage: set_red <bridge-host> <username>")?;
    let username = args.next().ok_or("usage: set_red <bridge-host> <username>")?;

    let mut transport = Transport::new(&host);

    println!("Listing lights on bridge at {}...", host);
    let lights = transport.send_request_bypass_body_validation(
        &format!("/api/{}/lights", username),
        Method::Get,
        None,
    )?;

    let ids: Vec<String> = lights
        .as_object()
        .map(|lights| lights.keys().cloned().collect())
        .unwrap_or_default();

    if ids.is_empty() {
        println!("No lights found on the bridge.");
        return Ok(());
    }

    println!("Found {} light(s)", ids.len());

    let red = Color::rgb(255, 0, 0).to_xy();
    let state = json!({ "on": true, "xy": [red.x(), red.y()], "bri": red.brightness() });

    println!("\nSetting all lights to red...");

    for id in ids {
        let path = format!("/api/{}/lights/{}/state", username, id);
        match transport.send_request(&path, Method::Put, Some(&state)) {
            Ok(_) => println!("  ✓ Successfully set light {} to red", id),
            Err(e) if e.is_connection_failure() => {
                eprintln!("  ✗ Lost the bridge while setting light {}: {}", id, e);
                break;
            }
            Err(e) => eprintln!("  ✗ Failed to set light {} to red: {}", id, e),
        }
    }

    println!("\nDone!");
    Ok(())
}
