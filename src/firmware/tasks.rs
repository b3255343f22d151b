use embassy_time::{Duration, Instant, Timer};
use stackpet::{
    config::active_config, hold_to_confirm, wait_for_release, AngleAccumulator, AnimationStack,
    Clamped, GestureDispatcher, Timeline,
};

use super::{
    chsc6x::Chsc6x,
    clock::EmbassyClock,
    config::{POSE_UPDATES, STACK_BASE, STACK_CAPACITY, STACK_LAYERS, WAKE_HOLD_MS},
    platform::HalI2c,
    types::{ChannelSurface, PoseChange, SpriteId},
};

pub(crate) type TouchPanel = Clamped<Chsc6x<'static, HalI2c<'static>>>;

#[embassy_executor::task]
pub(crate) async fn gesture_task(mut panel: TouchPanel) {
    let config = active_config();
    let mut clock = EmbassyClock;
    let mut dispatcher = GestureDispatcher::from_config(config);
    let mut timeline: Timeline<SpriteId, STACK_CAPACITY> = Timeline::new();
    let mut surface = ChannelSurface::default();
    let mut angle = AngleAccumulator::default();

    let sprites = STACK_LAYERS
        .iter()
        .enumerate()
        .map(|(idx, size)| (SpriteId(idx as u8), *size));
    let mut stack: AnimationStack<SpriteId, STACK_CAPACITY> =
        match AnimationStack::from_sprites(STACK_BASE, sprites) {
            Ok(stack) => stack,
            Err(err) => {
                log::error!("gesture: {}", err);
                return;
            }
        };

    log::info!(
        "gesture: waiting for a {}ms hold on the tap area",
        WAKE_HOLD_MS
    );
    while !hold_to_confirm(
        &mut panel,
        &mut clock,
        config.tap.region,
        Duration::from_millis(WAKE_HOLD_MS),
        config.polling.hold_interval_ms,
    )
    .await
    {}

    dispatcher.poll_tap(
        &mut panel,
        config.tap.region,
        config.tap.binding,
        &mut stack,
        &mut angle,
        &mut timeline,
    );
    wait_for_release(&mut panel, &mut clock, config.polling.hold_interval_ms).await;
    log::info!("gesture: awake layers={}", stack.len());

    let loop_interval = Duration::from_millis(config.polling.loop_interval_ms);
    loop {
        dispatcher.poll_swipe(&mut panel, &mut stack, &mut angle, &mut timeline);
        timeline.advance(Instant::now().as_millis(), &mut surface);

        if surface.dropped > 0 {
            log::warn!("gesture: renderer behind, dropped {} pose updates", surface.dropped);
            surface.dropped = 0;
        }
        Timer::after(loop_interval).await;
    }
}

/// Stand-in consumer for the display side until a renderer is attached.
#[embassy_executor::task]
pub(crate) async fn pose_trace_task() {
    loop {
        let update = POSE_UPDATES.receive().await;
        match update.change {
            PoseChange::Rotation(tenths) => {
                log::trace!("pose: sprite={} rotation={}", update.sprite.0, tenths)
            }
            PoseChange::Pivot(p) => {
                log::trace!("pose: sprite={} pivot=({},{})", update.sprite.0, p.x, p.y)
            }
            PoseChange::Position(p) => {
                log::trace!("pose: sprite={} position=({},{})", update.sprite.0, p.x, p.y)
            }
        }
    }
}
