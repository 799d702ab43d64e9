//! FreeRTOS-backed thread spawning with explicit priority and stack.
//!
//! ESP-IDF maps `std::thread` onto pthreads, which are FreeRTOS tasks.
//! `esp_pthread_set_cfg()` configures the *next* `pthread_create()` from
//! the calling thread, so the config and the spawn must stay paired.
//! The C3 has a single core; no affinity is set.

use std::io;
use std::thread::JoinHandle;

/// Spawn `f` as a task.  `name` must be NUL-terminated (`"tx-worker\0"`).
#[cfg(target_os = "espidf")]
pub fn spawn_task(
    priority: u8,
    stack_kb: usize,
    name: &'static str,
    f: impl FnOnce() + Send + 'static,
) -> io::Result<JoinHandle<()>> {
    // SAFETY: `cfg` lives across the call and `name` is a static,
    // NUL-terminated string.
    let ret = unsafe {
        let mut cfg = esp_idf_sys::esp_create_default_pthread_config();
        cfg.prio = i32::from(priority);
        cfg.stack_size = (stack_kb * 1024) as _;
        cfg.thread_name = name.as_ptr().cast();
        esp_idf_sys::esp_pthread_set_cfg(&cfg)
    };
    if ret != esp_idf_sys::ESP_OK as i32 {
        return Err(io::Error::other(format!("esp_pthread_set_cfg failed: {ret}")));
    }

    let display_name = name.trim_end_matches('\0');
    log::info!(
        "Spawning '{}' (pri={}, stack={}KB)",
        display_name,
        priority,
        stack_kb
    );

    std::thread::Builder::new()
        .name(display_name.into())
        .spawn(f)
}

/// Simulation fallback; priority is ignored.
#[cfg(not(target_os = "espidf"))]
pub fn spawn_task(
    _priority: u8,
    stack_kb: usize,
    name: &'static str,
    f: impl FnOnce() + Send + 'static,
) -> io::Result<JoinHandle<()>> {
    let display_name = name.trim_end_matches('\0');
    log::info!("Spawning '{}' (sim, stack={}KB)", display_name, stack_kb);

    std::thread::Builder::new()
        .name(display_name.into())
        .stack_size(stack_kb * 1024)
        .spawn(f)
}
