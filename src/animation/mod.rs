pub mod kinematics;
pub mod stack;
pub mod timeline;

pub use kinematics::{Kinematics, Pose, ANGLE_UNITS_PER_TURN};
pub use stack::{
    AngleAccumulator, AnimationScheduler, AnimationStack, AnimationTiming, LayerJob, Repeat,
    ScheduleError, SpriteLayer, SpriteSurface, StackError,
};
pub use timeline::Timeline;
