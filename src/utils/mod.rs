mod maths_utils;
mod time_utils;

pub use time_utils::{TimeUtils, epoch_ms_to_utc, local_now_as_timestamp_ms};

pub use maths_utils::mean_and_stddev;
pub(crate) use maths_utils::{get_max, get_min};
