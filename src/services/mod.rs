// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - session logic and the collaborators it drives.

pub mod geolocation;
pub mod map;
pub mod session;
pub mod ui;

pub use geolocation::{FixedGeolocator, GeolocationError, Geolocator};
pub use map::{GeoJsonMap, MapView};
pub use session::{FormState, SessionController};
pub use ui::{FormView, HeadlessForm, HeadlessList, ListView, UiHandles};
