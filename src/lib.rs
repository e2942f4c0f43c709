//! # lsb_stash 库
//!
//! 本库包含 LSB 隐写与文件取证工具的核心逻辑。

// 声明库包含的所有模块。

pub mod bitstream;
pub mod carrier;
pub mod cli;
pub mod constants;
pub mod error;
pub mod forensics;
pub mod handler;
pub mod signature;
