pub mod support;

mod categories;
mod config;
mod logging;
mod nyuc2gs;
mod wa2nyuc;
mod wacv2csv;
