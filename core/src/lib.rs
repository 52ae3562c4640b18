pub mod config;
pub mod easing;
pub mod indicators;
pub mod input;
pub mod layout;
pub mod lightbox;
pub mod navigator;
pub mod tween;

pub use config::{ConfigError, GalleryRange, KeyBindings, NavigatorConfig};
pub use easing::{lerp_translation, EaseMode, Easing, EasingParseError};
pub use indicators::representative_target;
pub use input::SwipeTracker;
pub use layout::{
    GridCell, LayoutError, LayoutSpec, LayoutTable, LayoutUnits, Translation, Viewport,
};
pub use lightbox::{Lightbox, LightboxKey, LightboxView};
pub use navigator::{
    Direction, NavOutcome, NavPhase, NavigatorError, SectionNavigator, Stage, SwipeOutcome,
    TransitionTicket, WheelOutcome,
};
pub use tween::{Tween, TweenFrame};
