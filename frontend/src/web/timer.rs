//! 定时器封装模块
//!
//! 基于 `setTimeout` 的一次性延迟，用于为网络请求加上超时。

use std::time::Duration;
use wasm_bindgen_futures::JsFuture;

/// 等待指定时长
///
/// 无法获取 window 对象时返回的 future 永远不会完成，
/// 此时与之竞争的请求本身也会失败。
pub async fn delay(duration: Duration) {
    let millis = duration.as_millis().min(i32::MAX as u128) as i32;

    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis);
        }
    });

    let _ = JsFuture::from(promise).await;
}
