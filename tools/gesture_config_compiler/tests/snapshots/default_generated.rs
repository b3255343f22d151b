// Generated by gesture_config_compiler. Do not edit.
pub const GESTURE_CONFIG: GestureConfig = GestureConfig {
    panel: PanelExtent::new(240, 240),
    swipe: SwipeConfig {
        region: Region::rect(0, 240, 0, 240),
        min_length: 20,
        outlier_jump_px: 80,
        release_confirm_reads: 2,
    },
    bindings: SwipeMapping {
        left: Binding::new(Kinematics::Rotate, -3600),
        right: Binding::new(Kinematics::Rotate, 3600),
        up: Binding::new(Kinematics::Item, 3600),
        down: Binding::new(Kinematics::Pet, 1800),
    },
    tap: TapConfig {
        region: Region::circle(Point::new(120, 120), 60),
        binding: Binding::new(Kinematics::Pet, 900),
    },
    animation: AnimationConfig {
        duration_ms: 1000,
        repeat: Repeat::Once,
    },
    polling: PollingConfig {
        hold_interval_ms: 10,
        loop_interval_ms: 10,
    },
};
