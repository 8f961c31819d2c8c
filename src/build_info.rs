//! Compile-time build information, stamped by build.rs.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));
