//! AnvilGUI demo
//!
//! Plays one anvil interaction against an in-memory server: open a GUI, type
//! a name, click the output, close. Every packet the server would send is
//! printed, optionally with its wire frame.

use anvilgui_adapters::{AdapterRegistry, VersionAdapter};
use anvilgui_config::{AnvilConfig, CONFIG_FILE_NAME};
use anvilgui_core::{Component, PlayerId, Slot};
use anvilgui_gui::{AnvilGui, Dispatcher, GuiManager, ResponseAction};
use anvilgui_host::MemoryHost;
use anvilgui_protocol::{
    decode_serverbound, encode_clientbound, encode_serverbound, write_string, ClickMode, PacketIds,
    ServerboundPacket, ITEM_NAME_CHANNEL,
};
use anyhow::{Context, Result};
use bytes::BytesMut;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "anvilgui-demo", about = "Simulate an anvil text-input GUI on a given server version")]
struct Args {
    /// Version string the simulated server reports
    #[arg(long, default_value = "git-Paper-196 (MC: 1.19.4)")]
    server_version: String,

    /// Text the simulated player types
    #[arg(long, default_value = "Diamond Sword")]
    text: String,

    /// Configuration file
    #[arg(long, default_value = CONFIG_FILE_NAME)]
    config: PathBuf,

    /// Print the encoded frame of every packet
    #[arg(long)]
    frames: bool,

    /// List the supported version ranges and exit
    #[arg(long)]
    list_versions: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = AnvilConfig::load_or_default(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    config.display();

    let registry = AdapterRegistry::with_defaults()?;
    if args.list_versions {
        for entry in registry.entries() {
            println!("{:<24} {}", entry.range.to_string(), (entry.factory)().family());
        }
        return Ok(());
    }

    let host = Arc::new(MemoryHost::new(args.server_version.clone()));
    let dispatcher = Arc::new(Dispatcher::with_version_override(
        host.clone(),
        registry,
        config.version_override.clone(),
    ));
    let adapter = *dispatcher.adapter()?;
    let ids = adapter.packet_ids();
    info!("Simulating {} with adapter {}", args.server_version, adapter.family());

    let manager = GuiManager::new(dispatcher.clone());
    let player = PlayerId::new(1);
    host.connect(player);

    let mut builder = AnvilGui::builder()
        .title(config.default_title())
        .text("Name your item")
        .on_recompute(|state| {
            state
                .left
                .clone()
                .map(|item| item.with_display_name(state.text.clone()))
        })
        .on_click(|slot, state| {
            if slot != Slot::Output {
                return Vec::new();
            }
            if state.text.trim().is_empty() {
                return vec![ResponseAction::update_title(
                    Component::text("Name must not be empty"),
                    false,
                )];
            }
            let text = state.text.clone();
            vec![
                ResponseAction::run(move |player| info!("{} picked the name {:?}", player, text)),
                ResponseAction::Close,
            ]
        })
        .on_close(|state| info!("GUI closed with text {:?}", state.text));
    if config.prevent_close {
        builder = builder.prevent_close();
    }
    manager.open(player, builder.build())?;
    print_sent(&host, ids, args.frames);

    let window_id = manager
        .get(player)
        .and_then(|gui| gui.lock().session().map(|session| session.window_id()))
        .context("GUI did not open")?;

    // The player types, then takes the output
    let rename = receive(rename_packet(ids, &args.text), ids)?;
    let outcome = manager.handle_packet(player, &rename)?;
    info!("Rename packet: {:?}", outcome);
    print_sent(&host, ids, args.frames);

    let click = receive(
        ServerboundPacket::ClickWindow {
            window_id,
            slot: dispatcher.translate_slot(Slot::Output)? as i16,
            button: 0,
            mode: ClickMode::Pickup,
        },
        ids,
    )?;
    let outcome = manager.handle_packet(player, &click)?;
    info!("Output click: {:?}", outcome);
    print_sent(&host, ids, args.frames);

    if manager.open_count() > 0 {
        warn!("GUI still open, shutting down");
        manager.shutdown()?;
        print_sent(&host, ids, args.frames);
    }
    Ok(())
}

/// The packet this family's client sends when the player types `text`
fn rename_packet(ids: &PacketIds, text: &str) -> ServerboundPacket {
    if !ids.rename_via_plugin_channel {
        return ServerboundPacket::RenameItem { name: text.to_string() };
    }

    let data = if ids.plugin_data_length_prefixed {
        // The length prefix is on the plugin message itself
        text.as_bytes().to_vec()
    } else {
        let mut buf = BytesMut::new();
        write_string(&mut buf, text);
        buf.to_vec()
    };
    ServerboundPacket::PluginMessage {
        channel: ITEM_NAME_CHANNEL.to_string(),
        data,
    }
}

/// Send a packet through the wire codec, as a real connection would
fn receive(packet: ServerboundPacket, ids: &PacketIds) -> Result<ServerboundPacket> {
    let mut frame = encode_serverbound(&packet, ids)?;
    Ok(decode_serverbound(&mut frame, ids)?)
}

fn print_sent(host: &MemoryHost, ids: &PacketIds, frames: bool) {
    for sent in host.take_sent() {
        println!("-> {} {:?}", sent.player, sent.packet);
        if frames {
            let frame = encode_clientbound(&sent.packet, ids);
            let hex: Vec<String> = frame.iter().map(|b| format!("{:02x}", b)).collect();
            println!("   [{}]", hex.join(" "));
        }
    }
}
