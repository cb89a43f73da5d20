//! HTMX route handlers. Each returns an HTML fragment; side effects the
//! main thread must perform travel as `<script>` snippets inside it.

pub mod catalog;
pub mod collection;
pub mod detail;
pub mod feedback;
pub mod pokemon;
pub mod stats;
pub mod sync;
pub mod util;
pub mod view;
