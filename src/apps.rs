//! Built-in app catalog of the desktop.

use crate::registry::{AppDescriptor, AppRegistry, RegistryError};
use crate::renderable::{Renderable, View};

struct CatalogEntry {
    id: &'static str,
    name: &'static str,
    icon: &'static str,
    component: &'static str,
    size: Option<(u32, u32)>,
}

const fn entry(
    id: &'static str,
    name: &'static str,
    icon: &'static str,
    component: &'static str,
    size: Option<(u32, u32)>,
) -> CatalogEntry {
    CatalogEntry {
        id,
        name,
        icon,
        component,
        size,
    }
}

#[rustfmt::skip]
const CATALOG: &[CatalogEntry] = &[
    entry("appstore", "App Store", "/img/icons/apps/shop.png", "apps/AppStore", None),
    entry("files", "Files", "/img/icons/apps/files.png", "apps/FileExplorer", Some((400, 450))),
    entry("email", "M@iler", "/img/icons/apps/email.png", "apps/Mailer", None),
    entry("browser", "Web Browser", "/img/icons/apps/browser2.png", "apps/Browser", None),
    entry("calculator", "Calculator", "/img/icons/apps/calculator.png", "apps/Calculator", Some((300, 550))),
    entry("notes", "Notepad", "/img/icons/apps/notepad.png", "apps/Notepad", Some((400, 450))),
    entry("lifeinvader", "LifeInvader", "/img/icons/apps/lifeinvader.png", "apps/LifeInvader", Some((400, 800))),
    entry("dynasty8", "Dynasty 8", "/img/icons/apps/dynasty8.png", "apps/Dynasty8", None),
    entry("vpn", "Turd VPN", "/img/icons/apps/vpn.png", "apps/Vpn", Some((800, 450))),
    entry("taxi", "Goober Taxi", "/img/icons/apps/taxi.png", "apps/Taxi", None),
    entry("bank", "Maze Bank", "/img/icons/apps/bank.png", "apps/Bank", None),
    entry("crypto", "Crypto Miner", "/img/icons/apps/crypto.png", "apps/CryptoMiner", None),
    entry("clicker", "Donut Dash", "/img/icons/apps/games/clicker.png", "apps/games/Clicker", None),
    entry("garage", "Garage", "/img/icons/apps/garage.png", "apps/Garage", Some((600, 400))),
    entry("market", "Market", "/img/icons/apps/market.png", "apps/Market", None),
    entry("events", "Events", "/img/icons/apps/events.png", "apps/Events", None),
    entry("reaction", "Reaction Test", "/img/icons/apps/games/reaction.png", "apps/games/ReactionTest", Some((450, 450))),
    entry("memory", "Memory Match", "/img/icons/apps/games/memory.png", "apps/games/MemoryMatch", Some((800, 850))),
    entry("slots", "Slot Machine", "/img/icons/apps/games/slots.png", "apps/games/SlotMachine", Some((450, 450))),
    entry("tictactoe", "Tick Tac Toe", "/img/icons/apps/games/tictactoe.png", "apps/games/TicTacToe", Some((450, 450))),
    entry("2048game", "2048 Game", "/img/icons/apps/games/2048game.png", "apps/games/Game2048", Some((450, 475))),
    entry("whackamole", "Whack-A-Mole", "/img/icons/apps/games/whackamole.png", "apps/games/WhackAMole", Some((650, 800))),
    entry("wifibreach", "Wifi Breacher", "/img/icons/apps/hacks/wifibreach.png", "apps/hacks/WifiBreach", None),
    entry("bruteforcepin", "Pin Cracker", "/img/icons/apps/hacks/bruteforcepin.png", "apps/hacks/BruteForcePin", Some((600, 600))),
    entry("encryptionpuzzle", "Encrypt", "/img/icons/apps/hacks/encryptionpuzzle.png", "apps/hacks/EncryptionPuzzle", Some((800, 450))),
    entry("signaljammer", "Signal Jammer", "/img/icons/apps/hacks/signaljammer.png", "apps/hacks/SignalJammer", None),
    entry("portscanner", "Port Scanner", "/img/icons/apps/hacks/portscanner.png", "apps/hacks/PortScanner", None),
];

fn descriptor(entry: &CatalogEntry) -> AppDescriptor {
    let component = entry.component;
    let renderable = Renderable::lazy(component, move || async move { Ok(View::new(component)) });
    let app = AppDescriptor::new(entry.id, entry.name, entry.icon).with_renderable(renderable);
    match entry.size {
        Some((width, height)) => app.with_default_size(width, height),
        None => app,
    }
}

/// Registry holding every built-in app. Nothing is loaded while building it.
pub fn builtin_registry() -> Result<AppRegistry, RegistryError> {
    AppRegistry::new(CATALOG.iter().map(descriptor).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_well_formed() {
        let registry = builtin_registry().expect("catalog must validate");
        assert_eq!(registry.len(), CATALOG.len());
        assert_eq!(registry.list_apps()[0].id().as_str(), "appstore");
        assert!(registry.iter().all(|app| !app.renderable().is_started()));
    }

    #[test]
    fn calculator_has_its_default_size() {
        let registry = builtin_registry().unwrap();
        let calc = registry.get("calculator").unwrap();
        assert_eq!(calc.name(), "Calculator");
        assert_eq!(calc.default_width(), Some(300));
        assert_eq!(calc.default_height(), Some(550));
        assert_eq!(registry.get("bank").unwrap().default_width(), None);
    }

    #[test]
    fn catalog_content_loads_on_demand() {
        let registry = builtin_registry().unwrap();
        let notes = registry.get("notes").unwrap();
        let view = pollster::block_on(notes.renderable().load()).unwrap();
        assert_eq!(view.component(), "apps/Notepad");
        assert!(notes.renderable().is_started());
    }
}
