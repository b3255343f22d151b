use std::{
    env,
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
    process,
};

use embedded_graphics::prelude::Point;
use stackpet::{
    config::{active_config, GestureConfig},
    touch::swipe::SwipeLimits,
    PanelExtent, SwipeDetector, SwipeDirection, SwipeEvent,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ReplaySample {
    ms: u64,
    point: Option<Point>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(usage());
    }

    let mut trace_path: Option<PathBuf> = None;
    let mut expect_path: Option<PathBuf> = None;
    let mut min_length: Option<i32> = None;

    let mut idx = 1usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--expect" => {
                idx += 1;
                let Some(path) = args.get(idx) else {
                    return Err("missing path after --expect".into());
                };
                expect_path = Some(PathBuf::from(path));
            }
            "--min-length" => {
                idx += 1;
                let Some(value) = args.get(idx) else {
                    return Err("missing value after --min-length".into());
                };
                let parsed = value
                    .parse::<i32>()
                    .map_err(|e| format!("invalid --min-length '{value}': {e}"))?;
                min_length = Some(parsed);
            }
            "-h" | "--help" => {
                println!("{}", usage());
                return Ok(());
            }
            value if value.starts_with('-') => {
                return Err(format!("unknown argument: {value}"));
            }
            value => {
                if trace_path.is_some() {
                    return Err("multiple trace paths provided".into());
                }
                trace_path = Some(PathBuf::from(value));
            }
        }
        idx += 1;
    }

    let trace_path = trace_path.ok_or_else(usage)?;
    let samples = parse_trace(&trace_path)?;

    let mut config = *active_config();
    if let Some(min_length) = min_length {
        config.swipe.min_length = min_length;
    }
    let swipes = replay(&samples, &config);

    println!("swipe,ms,direction,start_x,start_y,end_x,end_y");
    for (ms, event) in &swipes {
        println!(
            "swipe,{},{},{},{},{},{}",
            ms, event.direction, event.start.x, event.start.y, event.end.x, event.end.y
        );
    }

    if let Some(expect_path) = expect_path {
        let expected = parse_expected_directions(&expect_path)?;
        let actual: Vec<SwipeDirection> = swipes.iter().map(|(_, e)| e.direction).collect();
        if actual != expected {
            eprintln!("expected swipes: {}", join(&expected));
            eprintln!("actual swipes:   {}", join(&actual));
            return Err("swipe sequence mismatch".into());
        }
    }

    Ok(())
}

fn usage() -> String {
    "usage: touch_replay <trace.txt> [--expect expected_swipes.txt] [--min-length px]".to_string()
}

fn join(directions: &[SwipeDirection]) -> String {
    directions
        .iter()
        .map(|d| d.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

/// Feeds every sample through a detector configured like the device, then pads the
/// trace with releases so a gesture cut off at the end of a capture still resolves.
fn replay(samples: &[ReplaySample], config: &GestureConfig) -> Vec<(u64, SwipeEvent)> {
    let extent: PanelExtent = config.panel;
    let mut detector = SwipeDetector::with_limits(SwipeLimits {
        outlier_jump_px: config.swipe.outlier_jump_px,
        release_confirm_reads: config.swipe.release_confirm_reads,
    });

    let tail_ms = samples.last().map_or(0, |s| s.ms);
    let tail = (1..=u64::from(config.swipe.release_confirm_reads)).map(|step| ReplaySample {
        ms: tail_ms + step * config.polling.loop_interval_ms,
        point: None,
    });

    let mut swipes = Vec::new();
    for sample in samples.iter().copied().chain(tail) {
        let point = sample.point.map(|p| extent.clamp(p));
        if let Some(event) = detector.poll(point, config.swipe.region, config.swipe.min_length) {
            swipes.push((sample.ms, event));
        }
    }
    swipes
}

fn parse_trace(path: &Path) -> Result<Vec<ReplaySample>, String> {
    let file = File::open(path).map_err(|e| format!("failed to open {}: {e}", path.display()))?;
    let reader = BufReader::new(file);

    let mut out: Vec<ReplaySample> = Vec::new();
    for (line_no, line_result) in reader.lines().enumerate() {
        let line_no = line_no + 1;
        let line = line_result
            .map_err(|e| format!("failed to read {}:{}: {e}", path.display(), line_no))?;
        if let Some(sample) =
            parse_trace_line(&line).map_err(|e| format!("{}:{} {e}", path.display(), line_no))?
        {
            out.push(sample);
        }
    }

    Ok(out)
}

fn parse_trace_line(line: &str) -> Result<Option<ReplaySample>, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let parts: Vec<&str> = trimmed.split_whitespace().collect();
    let ms = parse_field::<u64>(parts[0], "ms")?;
    let point = match &parts[1..] {
        ["-"] => None,
        [x, y] => Some(Point::new(
            parse_field::<i32>(x, "x")?,
            parse_field::<i32>(y, "y")?,
        )),
        _ => {
            return Err("invalid trace line, expected `ms x y` or `ms -`".into());
        }
    };

    Ok(Some(ReplaySample { ms, point }))
}

fn parse_expected_directions(path: &Path) -> Result<Vec<SwipeDirection>, String> {
    let file = File::open(path).map_err(|e| format!("failed to open {}: {e}", path.display()))?;
    let reader = BufReader::new(file);

    let mut directions = Vec::new();
    for (line_no, line_result) in reader.lines().enumerate() {
        let line_no = line_no + 1;
        let line = line_result
            .map_err(|e| format!("failed to read {}:{}: {e}", path.display(), line_no))?;
        let token = line.trim();
        if token.is_empty() || token.starts_with('#') {
            continue;
        }

        let direction = normalize_direction(token).ok_or_else(|| {
            format!(
                "{}:{} invalid expected swipe direction: {}",
                path.display(),
                line_no,
                token
            )
        })?;
        directions.push(direction);
    }

    Ok(directions)
}

fn normalize_direction(token: &str) -> Option<SwipeDirection> {
    let token = token.trim().to_ascii_lowercase();
    let token = token.strip_prefix("swipe_").unwrap_or(&token);
    SwipeDirection::ALL
        .into_iter()
        .find(|direction| direction.as_str() == token)
}

fn parse_field<T>(raw: &str, field: &str) -> Result<T, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| format!("invalid {} '{}': {}", field, raw.trim(), e))
}
