#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

//! `mimosa-handler-octet` 提供 `application/octet-stream` 负载的透传处理扩展。
//!
//! # 教案背景（Why）
//! - 二进制透传是内容处理器家族的另一基准成员：没有格式校验分支，恰好展示契约的最小实现面；
//! - 与文本处理器成对，供注册中心测试与宿主框架的兜底处理使用。
//!
//! # 合约说明（What）
//! - 解码产物为 `Vec<u8>`，即负载字节的独立副本，所有权转移给调用方；
//! - 读源失败原样传播，除此之外不存在失败分支。

extern crate alloc;

mod octet;

pub use crate::octet::OctetStreamHandler;
