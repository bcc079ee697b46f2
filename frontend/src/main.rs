use bookclub_frontend::App;
use bookclub_frontend::config::AppConfig;
use leptos::prelude::*;

// Use lol_alloc as the global allocator for smaller WASM size
#[cfg(target_arch = "wasm32")]
use lol_alloc::{AssumeSingleThreaded, FreeListAllocator};

#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOCATOR: AssumeSingleThreaded<FreeListAllocator> =
    unsafe { AssumeSingleThreaded::new(FreeListAllocator::new()) };

pub fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::from_build_env();
    // 重复初始化只会返回错误，不影响运行
    let _ = console_log::init_with_level(config.log_level);
    log::debug!("api base url: {}", config.api_base_url);

    mount_to_body(App);
}
