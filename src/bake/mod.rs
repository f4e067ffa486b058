pub(crate) mod forces;
pub(crate) mod pipeline;
pub(crate) mod retime;
pub(crate) mod simplify;
pub(crate) mod world;
