use std::{fmt, fmt::Write as _, fs, path::Path};

use serde::Deserialize;

#[derive(Debug)]
pub enum ConfigCompilerError {
    Io(String),
    Parse(String),
    Validation(String),
}

impl fmt::Display for ConfigCompilerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "io error: {msg}"),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
            Self::Validation(msg) => write!(f, "validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigCompilerError {}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GestureFile {
    pub panel: PanelSpec,
    pub swipe: SwipeSpec,
    pub bindings: BindingsSpec,
    pub tap: TapSpec,
    pub animation: AnimationSpec,
    pub polling: PollingSpec,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PanelSpec {
    pub max_x: i32,
    pub max_y: i32,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SwipeSpec {
    pub min_length: i32,
    pub outlier_jump_px: i32,
    pub release_confirm_reads: u8,
    pub region: RegionSpec,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum RegionSpec {
    Rect {
        x_min: i32,
        x_max: i32,
        y_min: i32,
        y_max: i32,
    },
    Centered {
        x: i32,
        y: i32,
        half_width: i32,
        half_height: i32,
    },
    Circle {
        x: i32,
        y: i32,
        radius: i32,
    },
}

impl RegionSpec {
    /// Inclusive bounding box as `(x_min, x_max, y_min, y_max)`.
    fn bounding_box(self) -> (i32, i32, i32, i32) {
        match self {
            Self::Rect {
                x_min,
                x_max,
                y_min,
                y_max,
            } => (x_min, x_max, y_min, y_max),
            Self::Centered {
                x,
                y,
                half_width,
                half_height,
            } => (x - half_width, x + half_width, y - half_height, y + half_height),
            Self::Circle { x, y, radius } => (x - radius, x + radius, y - radius, y + radius),
        }
    }

    fn is_empty(self) -> bool {
        match self {
            Self::Circle { radius, .. } => radius <= 0,
            _ => {
                let (x_min, x_max, y_min, y_max) = self.bounding_box();
                x_max < x_min || y_max < y_min
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum KinematicsSpec {
    Pet,
    Item,
    Rotate,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RepeatSpec {
    Once,
    Infinite,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BindingSpec {
    pub kinematics: KinematicsSpec,
    pub offset: i32,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BindingsSpec {
    pub left: BindingSpec,
    pub right: BindingSpec,
    pub up: BindingSpec,
    pub down: BindingSpec,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TapSpec {
    pub region: RegionSpec,
    pub binding: BindingSpec,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AnimationSpec {
    pub duration_ms: u64,
    pub repeat: RepeatSpec,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PollingSpec {
    pub hold_interval_ms: u64,
    pub loop_interval_ms: u64,
}

pub fn parse_gesture_file(path: &Path) -> Result<GestureFile, ConfigCompilerError> {
    let source = fs::read_to_string(path)
        .map_err(|e| ConfigCompilerError::Io(format!("{}: {e}", path.display())))?;
    parse_gesture_str(&source)
}

pub fn parse_gesture_str(source: &str) -> Result<GestureFile, ConfigCompilerError> {
    toml::from_str(source).map_err(|e| ConfigCompilerError::Parse(e.to_string()))
}

pub fn validate_config(config: &GestureFile) -> Result<(), ConfigCompilerError> {
    let fail = |msg: String| Err(ConfigCompilerError::Validation(msg));
    let panel = config.panel;

    if panel.max_x <= 0 || panel.max_y <= 0 {
        return fail("panel.max_x and panel.max_y must be > 0".into());
    }

    let swipe = config.swipe;
    if swipe.min_length <= 0 {
        return fail("swipe.min_length must be > 0".into());
    }
    if swipe.outlier_jump_px <= 0 {
        return fail("swipe.outlier_jump_px must be > 0".into());
    }
    if swipe.release_confirm_reads == 0 {
        return fail("swipe.release_confirm_reads must be >= 1".into());
    }

    for (name, region) in [
        ("swipe.region", swipe.region),
        ("tap.region", config.tap.region),
    ] {
        if region.is_empty() {
            return fail(format!("{name} must not be empty"));
        }
        let (x_min, x_max, y_min, y_max) = region.bounding_box();
        if x_min < 0 || y_min < 0 || x_max > panel.max_x || y_max > panel.max_y {
            return fail(format!(
                "{name} must lie inside the panel (0..={}, 0..={})",
                panel.max_x, panel.max_y
            ));
        }
    }

    if config.animation.duration_ms == 0 {
        return fail("animation.duration_ms must be > 0".into());
    }
    if config.polling.hold_interval_ms == 0 || config.polling.loop_interval_ms == 0 {
        return fail("polling intervals must be > 0".into());
    }

    Ok(())
}

pub fn render_generated_config(config: &GestureFile) -> String {
    let mut out = String::new();
    out.push_str("// Generated by gesture_config_compiler. Do not edit.\n");
    out.push_str("pub const GESTURE_CONFIG: GestureConfig = GestureConfig {\n");

    let _ = writeln!(
        out,
        "    panel: PanelExtent::new({}, {}),",
        config.panel.max_x, config.panel.max_y
    );

    let swipe = config.swipe;
    out.push_str("    swipe: SwipeConfig {\n");
    let _ = writeln!(out, "        region: {},", render_region(swipe.region));
    let _ = writeln!(out, "        min_length: {},", swipe.min_length);
    let _ = writeln!(out, "        outlier_jump_px: {},", swipe.outlier_jump_px);
    let _ = writeln!(
        out,
        "        release_confirm_reads: {},",
        swipe.release_confirm_reads
    );
    out.push_str("    },\n");

    let bindings = config.bindings;
    out.push_str("    bindings: SwipeMapping {\n");
    for (name, binding) in [
        ("left", bindings.left),
        ("right", bindings.right),
        ("up", bindings.up),
        ("down", bindings.down),
    ] {
        let _ = writeln!(out, "        {name}: {},", render_binding(binding));
    }
    out.push_str("    },\n");

    out.push_str("    tap: TapConfig {\n");
    let _ = writeln!(out, "        region: {},", render_region(config.tap.region));
    let _ = writeln!(out, "        binding: {},", render_binding(config.tap.binding));
    out.push_str("    },\n");

    out.push_str("    animation: AnimationConfig {\n");
    let _ = writeln!(out, "        duration_ms: {},", config.animation.duration_ms);
    let _ = writeln!(
        out,
        "        repeat: Repeat::{},",
        match config.animation.repeat {
            RepeatSpec::Once => "Once",
            RepeatSpec::Infinite => "Infinite",
        }
    );
    out.push_str("    },\n");

    out.push_str("    polling: PollingConfig {\n");
    let _ = writeln!(
        out,
        "        hold_interval_ms: {},",
        config.polling.hold_interval_ms
    );
    let _ = writeln!(
        out,
        "        loop_interval_ms: {},",
        config.polling.loop_interval_ms
    );
    out.push_str("    },\n");

    out.push_str("};\n");
    out
}

fn render_region(region: RegionSpec) -> String {
    match region {
        RegionSpec::Rect {
            x_min,
            x_max,
            y_min,
            y_max,
        } => format!("Region::rect({x_min}, {x_max}, {y_min}, {y_max})"),
        RegionSpec::Centered {
            x,
            y,
            half_width,
            half_height,
        } => format!("Region::centered(Point::new({x}, {y}), {half_width}, {half_height})"),
        RegionSpec::Circle { x, y, radius } => {
            format!("Region::circle(Point::new({x}, {y}), {radius})")
        }
    }
}

fn render_binding(binding: BindingSpec) -> String {
    let kinematics = match binding.kinematics {
        KinematicsSpec::Pet => "Pet",
        KinematicsSpec::Item => "Item",
        KinematicsSpec::Rotate => "Rotate",
    };
    format!(
        "Binding::new(Kinematics::{kinematics}, {})",
        binding.offset
    )
}

pub fn generate_from_str(source: &str) -> Result<String, ConfigCompilerError> {
    let config = parse_gesture_str(source)?;
    validate_config(&config)?;
    Ok(render_generated_config(&config))
}

pub fn generate_from_path(path: &Path) -> Result<String, ConfigCompilerError> {
    let config = parse_gesture_file(path)?;
    validate_config(&config)?;
    Ok(render_generated_config(&config))
}
