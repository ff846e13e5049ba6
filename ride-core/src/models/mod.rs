mod daily_record;
mod settings;
mod stats;
mod window;

pub use daily_record::{DailyRecord, Earnings, NewDailyRecord};
pub use settings::{
    DEFAULT_APPS, DEFAULT_FUEL_PRICE_PER_LITER, DEFAULT_VEHICLE_AUTONOMY, Settings,
    UpdateAutonomyRequest, UpdateFuelPriceRequest, UpdateVehicleRequest,
};
pub(crate) use settings::{validate_autonomy, validate_fuel_price};
pub use stats::{AggregateStats, ChartPoint, PlatformShare, RecordPreview, WindowSummary};
pub use window::Window;
