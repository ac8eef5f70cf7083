mod estimate;

pub use estimate::EstimateService;
