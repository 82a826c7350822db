//! Native counter readers. The parsers are platform-neutral so they can be
//! tested anywhere; the readers only exist where their OS interface does.

#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
pub mod ioreg;
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
pub mod procfs;

#[cfg(target_os = "linux")]
pub mod linux;
#[cfg(target_os = "macos")]
pub mod macos;
