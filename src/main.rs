use std::env;
use std::process;
use std::sync::Arc;

use chordplay::{ChordPlayer, Dispatcher, SampleDirOutput, YamlFileStore};

const USAGE: &str = "Usage: chordplay [options] <chord>...

Options:
  --prefs <file>     Preference file (default: chordplay.yaml)
  --assets <dir>     Audio assets directory (default: assets/audio)
  --octave <n>       Set and save octave (0-6)
  --tempo <bpm>      Set and save tempo (50-150)
  --beats <n>        Set and save beat count (0-4)
  --style <n>        Set and save beat style index (0-3)
  --volume <v>       Set and save volume (0-1)
  --drums / --no-drums
  --dry-run          Print the schedule without playing";

struct Options {
    prefs: String,
    assets: String,
    octave: Option<i64>,
    tempo: Option<i64>,
    beats: Option<i64>,
    style: Option<i64>,
    volume: Option<f64>,
    drums: Option<bool>,
    dry_run: bool,
    chords: Vec<String>,
}

fn usage_error(message: &str) -> ! {
    eprintln!("{}", message);
    eprintln!("{}", USAGE);
    process::exit(1);
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: Option<String>) -> T {
    let Some(value) = value else {
        usage_error(&format!("Missing value for {}", flag));
    };
    value
        .parse()
        .unwrap_or_else(|_| usage_error(&format!("Invalid value for {}: '{}'", flag, value)))
}

fn parse_args() -> Options {
    let mut options = Options {
        prefs: "chordplay.yaml".to_string(),
        assets: "assets/audio".to_string(),
        octave: None,
        tempo: None,
        beats: None,
        style: None,
        volume: None,
        drums: None,
        dry_run: false,
        chords: Vec::new(),
    };

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{}", USAGE);
                process::exit(0);
            }
            "--prefs" => options.prefs = args.next().unwrap_or_else(|| usage_error("Missing value for --prefs")),
            "--assets" => options.assets = args.next().unwrap_or_else(|| usage_error("Missing value for --assets")),
            "--octave" => options.octave = Some(parse_number(&arg, args.next())),
            "--tempo" => options.tempo = Some(parse_number(&arg, args.next())),
            "--beats" => options.beats = Some(parse_number(&arg, args.next())),
            "--style" => options.style = Some(parse_number(&arg, args.next())),
            "--volume" => options.volume = Some(parse_number(&arg, args.next())),
            "--drums" => options.drums = Some(true),
            "--no-drums" => options.drums = Some(false),
            "--dry-run" => options.dry_run = true,
            flag if flag.starts_with("--") => usage_error(&format!("Unknown option: {}", flag)),
            _ => options.chords.push(arg),
        }
    }

    options
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = parse_args();

    let mut player = ChordPlayer::load(YamlFileStore::open_or_empty(&options.prefs));

    // Setting changes are saved even when no chord is given
    if let Some(v) = options.volume {
        player.change_volume(v);
    }
    if let Some(v) = options.octave {
        player.change_octave(v);
    }
    if let Some(v) = options.tempo {
        player.change_tempo(v);
    }
    if let Some(v) = options.beats {
        player.change_beat_count(v);
    }
    if let Some(v) = options.style {
        player.change_beat_style(v);
    }
    if let Some(v) = options.drums {
        player.toggle_drum(v);
    }

    if options.chords.is_empty() {
        let settings = player.settings();
        eprintln!(
            "volume={:.2} octave={} tempo={} beats={} drums={} style={}",
            settings.volume(),
            settings.octave(),
            settings.tempo(),
            settings.beat_count(),
            settings.drum_enabled(),
            settings.beat_style()
        );
        return;
    }

    let dispatcher = Dispatcher::new();
    let output = Arc::new(SampleDirOutput::new(&options.assets));
    let mut pending = Vec::new();
    let mut failed = false;

    for chord in &options.chords {
        let triggers = match player.parse_and_play(chord) {
            Ok(triggers) => triggers,
            Err(e) => {
                eprintln!("Invalid chord: {}", e);
                failed = true;
                continue;
            }
        };

        if options.dry_run {
            for t in &triggers {
                println!("{:>6}ms  {:<18} volume={:.2}", t.offset_ms, t.sample.path(), t.volume);
            }
            continue;
        }

        // Each chord is a new request; earlier ones keep sounding
        pending.push(dispatcher.spawn(triggers, Arc::clone(&output)));
        let step = dispatcher.latency().as_millis() as u64 + player.settings().subdivision_ms() * 4;
        std::thread::sleep(std::time::Duration::from_millis(step));
    }

    for handle in pending {
        if handle.join().is_err() {
            eprintln!("Playback thread panicked");
        }
    }

    if failed {
        process::exit(1);
    }
}
