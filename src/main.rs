//! # Diwali Sale Pulse - 程序入口点
//!
//! `main.rs` 仅负责启动应用，核心逻辑位于 `lib.rs` 中。

fn main() {
    app_lib::run();
}
