use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use hexabrot::presets;
use hexabrot::{
    CameraSettings, Easing, FrameUniforms, InputMode, KeyFlags, MandelbrotCamera, MovementIntent,
    Preset, SimplifiedAxis,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum CliMode {
    Regular,
    Julia,
    Exponent,
    JuliaToExponent,
}

impl From<CliMode> for InputMode {
    fn from(value: CliMode) -> Self {
        match value {
            CliMode::Regular => InputMode::Regular,
            CliMode::Julia => InputMode::JuliaWise,
            CliMode::Exponent => InputMode::ExponentWise,
            CliMode::JuliaToExponent => InputMode::JuliaToExponentWise,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum CliEasing {
    Linear,
    Bezier,
    Cubic,
}

impl From<CliEasing> for Easing {
    fn from(value: CliEasing) -> Self {
        match value {
            CliEasing::Linear => Easing::Linear,
            CliEasing::Bezier => Easing::EaseInOutBezier,
            CliEasing::Cubic => Easing::EaseInOutCubic,
        }
    }
}

fn parse_preset_name(name: &str) -> Result<String, String> {
    if presets::find(name).is_some() {
        return Ok(name.to_owned());
    }
    let known: Vec<_> = presets::built_in().iter().map(|named| named.name).collect();
    Err(format!("unknown preset '{name}' (known: {})", known.join(", ")))
}

/// Parses held keys: w/a/s/d for the four directions, '+' to jump, '-' to sneak.
fn parse_keys(keys: &str) -> Result<KeyFlags, String> {
    let mut flags = KeyFlags::default();
    for key in keys.chars() {
        match key.to_ascii_lowercase() {
            'a' => flags.left = true,
            'd' => flags.right = true,
            'w' => flags.up = true,
            's' => flags.down = true,
            '+' => flags.jump = true,
            '-' => flags.sneak = true,
            other => return Err(format!("unsupported key '{other}'")),
        }
    }
    Ok(flags)
}

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Fly the six-dimensional fractal camera headlessly")]
struct Args {
    /// Input mode used while flying
    #[arg(long, value_enum, default_value_t = CliMode::Regular)]
    mode: CliMode,

    /// Number of frames to simulate
    #[arg(long, default_value_t = 60)]
    frames: u32,

    /// Seconds per simulated frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f64,

    /// Built-in preset to start from
    #[arg(long, value_parser = parse_preset_name)]
    preset: Option<String>,

    /// Preset JSON file to start from (overrides --preset)
    #[arg(long)]
    preset_file: Option<PathBuf>,

    /// Keys held for the whole flight, e.g. "wd+"
    #[arg(long, value_parser = parse_keys, default_value = "")]
    keys: KeyFlags,

    /// Built-in preset to transition to at the first frame
    #[arg(long, value_parser = parse_preset_name)]
    transition_to: Option<String>,

    /// Transition length in seconds
    #[arg(long, default_value_t = 1.0)]
    transition_seconds: f64,

    #[arg(long, value_enum, default_value_t = CliEasing::Bezier)]
    easing: CliEasing,

    /// Settings file (defaults to $HEXABROT_SETTINGS, then the per-user config location)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Write the camera settings back after the flight
    #[arg(long)]
    save_settings: bool,

    /// Print a summary every N frames (0 prints only the last frame)
    #[arg(long, default_value_t = 10)]
    report_every: u32,

    /// Print the final camera state as preset JSON
    #[arg(long)]
    dump_preset: bool,
}

fn report(frame: u32, camera: &MandelbrotCamera) {
    let uniforms = FrameUniforms::from_camera(camera);
    let angles: Vec<_> = SimplifiedAxis::ALL
        .iter()
        .map(|&axis| format!("{} {:.4}", axis.label(), camera.simplified_rotation.angle(axis)))
        .collect();
    println!(
        "frame {frame:>5} [{}] pos {:?} zoom {:.4} right {:?} up {:?} iters {} ({})",
        camera.input_mode.label(),
        camera.position.to_array(),
        camera.zoom,
        uniforms.right_vector,
        uniforms.up_vector,
        uniforms.max_iterations,
        angles.join(", "),
    );
}

fn run(args: Args) -> hexabrot::Result<()> {
    let settings_path = args
        .settings
        .clone()
        .unwrap_or_else(CameraSettings::default_path);
    let settings = CameraSettings::load(&settings_path).unwrap_or_default();

    let mut camera = MandelbrotCamera::new();
    settings.apply_to(&mut camera);

    if let Some(path) = &args.preset_file {
        let json = std::fs::read_to_string(path)?;
        Preset::from_json_str(&json)?.apply(&mut camera);
        log::info!("Loaded preset {}", path.display());
    } else if let Some(preset) = args.preset.as_deref().and_then(presets::find) {
        preset.apply(&mut camera);
    }

    camera.select_input_mode(args.mode.into());
    if let Some(target) = args.transition_to.as_deref().and_then(presets::find) {
        camera.transition_to(target, args.transition_seconds, args.easing.into());
    }

    let intent = MovementIntent::from_keys(&args.keys);
    for frame in 1..=args.frames {
        camera.update_with_delta(&intent, args.dt);
        let last = frame == args.frames;
        if last || (args.report_every > 0 && frame % args.report_every == 0) {
            report(frame, &camera);
        }
    }

    if args.dump_preset {
        println!("{}", Preset::from_camera(&camera).to_json_string()?);
    }

    if args.save_settings {
        CameraSettings::from_camera(&camera).save(&settings_path)?;
        log::info!("Saved settings to {}", settings_path.display());
    }
    Ok(())
}

fn main() {
    hexabrot::init_logging();
    let args = Args::parse();
    if let Err(error) = run(args) {
        log::error!("{error}");
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}
