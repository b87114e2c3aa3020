mod detail;

mod explore;
pub use explore::{ExploreTab, ExploreView, ListingCard};

mod spot_detail;
pub use spot_detail::SpotDetailView;

mod accommodation_detail;
pub use accommodation_detail::AccommodationDetailView;

mod restaurant_detail;
pub use restaurant_detail::RestaurantDetailView;

mod events;
pub use events::EventsView;
