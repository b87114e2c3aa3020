mod layout;
pub use layout::AppLayout;

mod explore;
pub use explore::{Accommodations, Explore, Restaurants};

mod detail;
pub use detail::{AccommodationDetail, RestaurantDetail, SpotDetail};

mod events;
pub use events::Events;
