pub(crate) mod dsl;
pub(crate) mod keyframe;
pub(crate) mod model;
pub(crate) mod object;
pub(crate) mod physics;
pub(crate) mod property;
pub(crate) mod transition;
