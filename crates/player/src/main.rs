//! Tacref Player - desktop composition root binary.
//!
//! A small command-line front end over the player library: it loads faction
//! records, keeps the recent factions list and replays touch gestures.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

// The browser build is driven by the host page through the library.
#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::cell::Cell;
    use std::fmt::Write as _;
    use std::path::Path;
    use std::rc::Rc;

    use anyhow::Context;
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    use tacref_domain::{FactionId, FactionRecord, RecentFactions, SectionOutline};
    use tacref_player::infrastructure::platform::create_platform;
    use tacref_player::infrastructure::LocalPointerSource;
    use tacref_player::ports::outbound::{PointerEvent, PointerSample};
    use tacref_player::presentation::{SwipeBinding, SwipeConfig, SwipeDirection, SwipeHandlers};
    use tacref_player::{Platform, PlayerConfig};

    const USAGE: &str = "Usage: tacref-player <command>\n\nCommands:\n  outline <faction.json> [--json]\n  open <faction-id>\n  recent\n  clear-recent\n  swipe <x0> <y0> <t0> <x1> <y1> <t1>";

    pub fn run() -> anyhow::Result<()> {
        // A missing .env file is fine
        let _ = dotenvy::dotenv();

        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "tacref_player=info,tacref_domain=info".into()),
            )
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();

        let config = PlayerConfig::from_env().context("loading configuration")?;
        tracing::debug!("Configuration: {:?}", config);

        let platform = create_platform(config.storage_path.as_deref());

        let args: Vec<String> = std::env::args().skip(1).collect();
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        let output = match args.as_slice() {
            ["outline", path] => outline(&platform, Path::new(path), false)?,
            ["outline", path, "--json"] => outline(&platform, Path::new(path), true)?,
            ["open", raw] => render_recent(&open(&platform, raw)?),
            ["recent"] => render_recent(&platform.recent_factions().current()),
            ["clear-recent"] => {
                platform.recent_factions().clear();
                "Recent factions cleared\n".to_string()
            }
            ["swipe", rest @ ..] => {
                let (start, end) = parse_gesture(rest)?;
                describe_swipe(&config.swipe, replay_swipe(config.swipe, start, end))
            }
            [cmd, ..] => anyhow::bail!("Unknown command: {cmd}\n\n{USAGE}"),
            [] => anyhow::bail!("{USAGE}"),
        };
        print!("{output}");
        Ok(())
    }

    /// Load a faction record, count it as a visit and render its outline.
    fn outline(platform: &Platform, path: &Path, json: bool) -> anyhow::Result<String> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let record: FactionRecord = serde_json::from_str(&raw)
            .with_context(|| format!("parsing faction record {}", path.display()))?;

        match record.faction_id() {
            Some(id) => {
                platform.recent_factions().touch(&id);
            }
            None => tracing::warn!("Faction record has no usable id; not added to recents"),
        }

        render_outline(&record, json)
    }

    fn render_outline(record: &FactionRecord, json: bool) -> anyhow::Result<String> {
        let outline = SectionOutline::build(record);
        if json {
            return Ok(format!("{}\n", serde_json::to_string_pretty(&outline)?));
        }

        let mut out = String::new();
        if let Some(name) = record.name.as_deref() {
            writeln!(out, "{name}")?;
        }
        for section in &outline {
            writeln!(out, "{} (#{})", section.label, section.id)?;
            for child in &section.children {
                writeln!(out, "  {} (#{})", child.label, child.id)?;
            }
        }
        Ok(out)
    }

    fn open(platform: &Platform, raw: &str) -> anyhow::Result<RecentFactions> {
        let id = FactionId::parse(raw).with_context(|| format!("invalid faction id '{raw}'"))?;
        Ok(platform.recent_factions().touch(&id))
    }

    fn render_recent(recent: &RecentFactions) -> String {
        if recent.is_empty() {
            return "No recent factions\n".to_string();
        }
        recent
            .iter()
            .enumerate()
            .map(|(rank, id)| format!("{}. {id}\n", rank + 1))
            .collect()
    }

    fn number(raw: &str) -> anyhow::Result<f64> {
        let value = raw
            .parse::<f64>()
            .with_context(|| format!("'{raw}' is not a number"))?;
        if !value.is_finite() {
            anyhow::bail!("'{raw}' is not a finite number");
        }
        Ok(value)
    }

    /// `<x0> <y0> <t0> <x1> <y1> <t1>` into the first and last samples.
    fn parse_gesture(args: &[&str]) -> anyhow::Result<(PointerSample, PointerSample)> {
        let [x0, y0, t0, x1, y1, t1] = args else {
            anyhow::bail!("swipe takes 6 numbers: <x0> <y0> <t0> <x1> <y1> <t1>");
        };
        let start = PointerSample::new(number(x0)?, number(y0)?, number(t0)?);
        let end = PointerSample::new(number(x1)?, number(y1)?, number(t1)?);
        Ok((start, end))
    }

    /// Feed a down/move/up gesture through a fresh binding.
    fn replay_swipe(
        config: SwipeConfig,
        start: PointerSample,
        end: PointerSample,
    ) -> Option<SwipeDirection> {
        let detected: Rc<Cell<Option<SwipeDirection>>> = Rc::default();
        let handlers = {
            let left = Rc::clone(&detected);
            let right = Rc::clone(&detected);
            SwipeHandlers::new()
                .on_swipe_left(move || left.set(Some(SwipeDirection::Left)))
                .on_swipe_right(move || right.set(Some(SwipeDirection::Right)))
        };

        let source = LocalPointerSource::new();
        let binding = SwipeBinding::attach(source.clone(), config, handlers);
        source.dispatch_all([
            PointerEvent::Down(start),
            PointerEvent::Move(end),
            PointerEvent::Up,
        ]);
        drop(binding);

        detected.get()
    }

    fn describe_swipe(config: &SwipeConfig, detected: Option<SwipeDirection>) -> String {
        let text = match detected {
            Some(SwipeDirection::Left) => "swipe left",
            Some(SwipeDirection::Right) => "swipe right",
            None if !config.enabled => "no swipe (swipe detection disabled)",
            None => "no swipe",
        };
        format!("{text}\n")
    }

}
