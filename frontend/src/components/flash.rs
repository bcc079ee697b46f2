//! 跨页面的一次性提示
//!
//! 注册成功后跳转到登录页时使用，显示后 3 秒自动消失。

use leptos::prelude::*;
use std::time::Duration;

use crate::components::icons::CircleCheck;

const FLASH_DURATION: Duration = Duration::from_secs(3);

#[derive(Clone, Copy)]
pub struct FlashContext {
    message: RwSignal<Option<String>>,
    /// 每次 `show` 递增，过期回调只清除自己那一代的消息
    generation: RwSignal<u64>,
}

impl FlashContext {
    pub fn new() -> Self {
        Self {
            message: RwSignal::new(None),
            generation: RwSignal::new(0),
        }
    }

    pub fn show(&self, message: impl Into<String>) {
        self.generation.update(|g| *g += 1);
        self.message.set(Some(message.into()));
    }

    fn expire(&self, generation: u64) {
        if self.generation.get_untracked() == generation {
            self.message.set(None);
        }
    }
}

impl Default for FlashContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_flash() -> FlashContext {
    use_context::<FlashContext>().expect("FlashContext should be provided")
}

/// 成功提示横幅
#[component]
pub fn FlashBanner() -> impl IntoView {
    let flash = use_flash();

    // 3秒后清除通知，期间有新消息则交给新的定时器
    Effect::new(move |_| {
        if flash.message.get().is_some() {
            let shown = flash.generation.get_untracked();
            set_timeout(move || flash.expire(shown), FLASH_DURATION);
        }
    });

    view! {
        <Show when=move || flash.message.with(Option::is_some)>
            <div role="status" class="alert alert-success text-sm py-2">
                <CircleCheck attr:class="h-5 w-5" />
                <span>{move || flash.message.get().unwrap_or_default()}</span>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_timer_keeps_the_newer_message() {
        Owner::new().with(|| {
            let flash = FlashContext::new();
            flash.show("Account created. Please log in.");
            let first = flash.generation.get_untracked();
            flash.show("Second notice");

            flash.expire(first);
            assert_eq!(flash.message.get_untracked().as_deref(), Some("Second notice"));

            flash.expire(flash.generation.get_untracked());
            assert_eq!(flash.message.get_untracked(), None);
        });
    }
}
