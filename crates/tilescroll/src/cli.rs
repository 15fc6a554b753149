use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "tilescroll",
    author,
    version,
    about = "Duotone image effect with pointer-controlled scrolling bands"
)]
pub struct Cli {
    /// Image to display (png, jpeg, bmp or gif).
    #[arg(value_name = "IMAGE", env = "TILESCROLL_IMAGE")]
    pub image: PathBuf,

    /// Initial window size in physical pixels.
    #[arg(
        long,
        value_name = "WIDTHxHEIGHT",
        value_parser = parse_size,
        default_value = "1280x720"
    )]
    pub size: (u32, u32),

    /// Freeze the effect at this timestamp instead of animating.
    #[arg(long, value_name = "SECONDS", value_parser = parse_seconds)]
    pub still_time: Option<f32>,

    /// Render one frame on the CPU to the given PNG path, then exit.
    #[arg(long, value_name = "PATH")]
    pub still_export: Option<PathBuf>,

    /// Normalized pointer position used for still exports (e.g. `0.25,0.5`).
    #[arg(long, value_name = "X,Y", value_parser = parse_pointer)]
    pub pointer: Option<(f32, f32)>,

    /// Make the duotone polarity choice reproducible.
    #[arg(long, value_name = "N")]
    pub rng_seed: Option<u64>,
}

pub fn parse() -> Cli {
    Cli::parse()
}

pub fn parse_size(value: &str) -> Result<(u32, u32), String> {
    let (width, height) = value
        .trim()
        .split_once(['x', 'X', '×'])
        .ok_or_else(|| "expected WIDTHxHEIGHT, e.g. 1280x720".to_string())?;

    let width: u32 = width
        .trim()
        .parse()
        .map_err(|_| format!("invalid width '{width}'"))?;
    let height: u32 = height
        .trim()
        .parse()
        .map_err(|_| format!("invalid height '{height}'"))?;

    if width == 0 || height == 0 {
        return Err("window dimensions must be greater than zero".to_string());
    }
    Ok((width, height))
}

pub fn parse_pointer(value: &str) -> Result<(f32, f32), String> {
    let (x, y) = value
        .trim()
        .split_once(',')
        .ok_or_else(|| "expected X,Y, e.g. 0.25,0.5".to_string())?;

    let x: f32 = x
        .trim()
        .parse()
        .map_err(|_| format!("invalid pointer x '{x}'"))?;
    let y: f32 = y
        .trim()
        .parse()
        .map_err(|_| format!("invalid pointer y '{y}'"))?;

    if !x.is_finite() || !y.is_finite() {
        return Err("pointer coordinates must be finite".to_string());
    }
    Ok((x, y))
}

pub fn parse_seconds(value: &str) -> Result<f32, String> {
    let seconds: f32 = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid timestamp '{value}'"))?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err("timestamp must be a non-negative number of seconds".to_string());
    }
    Ok(seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_size_variants() {
        assert_eq!(parse_size("1280x720").unwrap(), (1280, 720));
        assert_eq!(parse_size(" 800 X 600 ").unwrap(), (800, 600));
        assert!(parse_size("1280").is_err());
        assert!(parse_size("0x720").is_err());
        assert!(parse_size("wide x tall").is_err());
    }

    #[test]
    fn parses_pointer() {
        assert_eq!(parse_pointer("0.25,0.5").unwrap(), (0.25, 0.5));
        assert_eq!(parse_pointer("-0.1, 1.2").unwrap(), (-0.1, 1.2));
        assert!(parse_pointer("0.5").is_err());
        assert!(parse_pointer("inf,0").is_err());
    }

    #[test]
    fn parses_seconds() {
        assert_eq!(parse_seconds("2.5").unwrap(), 2.5);
        assert!(parse_seconds("-1").is_err());
        assert!(parse_seconds("NaN").is_err());
    }

    #[test]
    fn cli_defaults() {
        let cli = Cli::try_parse_from(["tilescroll", "photo.png"]).unwrap();
        assert_eq!(cli.size, (1280, 720));
        assert!(cli.still_time.is_none());
        assert!(cli.still_export.is_none());
        assert!(cli.pointer.is_none());
    }
}
