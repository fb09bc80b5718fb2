// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 测试用的最小 ONNX 图
//!
//! 直接按 protobuf 线格式编码单节点模型，输入恒为 `float_input: float[1, 14]`，
//! 避免在仓库中提交二进制模型文件。

use std::fs;
use std::path::{Path, PathBuf};

const FLOAT: i64 = 1;
const INT64: i64 = 7;
const ATTR_INT: i64 = 2;
const ATTR_INTS: i64 = 7;
const OPSET: i64 = 13;

fn varint(mut value: u64, out: &mut Vec<u8>) {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}

fn int_field(field: u64, value: i64, out: &mut Vec<u8>) {
    varint(field << 3, out);
    varint(value as u64, out);
}

fn bytes_field(field: u64, data: &[u8], out: &mut Vec<u8>) {
    varint((field << 3) | 2, out);
    varint(data.len() as u64, out);
    out.extend_from_slice(data);
}

fn value_info(name: &str, elem_type: i64, dims: &[i64]) -> Vec<u8> {
    let mut shape = Vec::new();
    for &dim in dims {
        let mut d = Vec::new();
        int_field(1, dim, &mut d);
        bytes_field(1, &d, &mut shape);
    }

    let mut tensor = Vec::new();
    int_field(1, elem_type, &mut tensor);
    bytes_field(2, &shape, &mut tensor);

    let mut type_proto = Vec::new();
    bytes_field(1, &tensor, &mut type_proto);

    let mut out = Vec::new();
    bytes_field(1, name.as_bytes(), &mut out);
    bytes_field(2, &type_proto, &mut out);
    out
}

fn int_attribute(name: &str, value: i64) -> Vec<u8> {
    let mut out = Vec::new();
    bytes_field(1, name.as_bytes(), &mut out);
    int_field(3, value, &mut out);
    int_field(20, ATTR_INT, &mut out);
    out
}

fn ints_attribute(name: &str, values: &[i64]) -> Vec<u8> {
    let mut out = Vec::new();
    bytes_field(1, name.as_bytes(), &mut out);
    for &value in values {
        int_field(8, value, &mut out);
    }
    int_field(20, ATTR_INTS, &mut out);
    out
}

fn single_node_model(
    op_type: &str,
    attributes: &[Vec<u8>],
    output_name: &str,
    output_type: i64,
    output_dims: &[i64],
) -> Vec<u8> {
    let mut node = Vec::new();
    bytes_field(1, b"float_input", &mut node);
    bytes_field(2, output_name.as_bytes(), &mut node);
    bytes_field(4, op_type.as_bytes(), &mut node);
    for attribute in attributes {
        bytes_field(5, attribute, &mut node);
    }

    let mut graph = Vec::new();
    bytes_field(1, &node, &mut graph);
    bytes_field(2, b"phishrs_fixture", &mut graph);
    bytes_field(11, &value_info("float_input", FLOAT, &[1, 14]), &mut graph);
    bytes_field(12, &value_info(output_name, output_type, output_dims), &mut graph);

    let mut opset = Vec::new();
    int_field(2, OPSET, &mut opset);

    let mut model = Vec::new();
    int_field(1, 8, &mut model);
    bytes_field(2, b"phishrs", &mut model);
    bytes_field(7, &graph, &mut model);
    bytes_field(8, &opset, &mut model);
    model
}

/// `ArgMax(axis=1)`：输出 int64 标签，值为最大特征的下标
pub(crate) fn argmax_label(output_name: &str) -> Vec<u8> {
    single_node_model(
        "ArgMax",
        &[int_attribute("axis", 1), int_attribute("keepdims", 0)],
        output_name,
        INT64,
        &[1],
    )
}

/// `Softmax(axis=1)`：输出 14 列 f32 概率
pub(crate) fn softmax_scores(output_name: &str) -> Vec<u8> {
    single_node_model(
        "Softmax",
        &[int_attribute("axis", 1)],
        output_name,
        FLOAT,
        &[1, 14],
    )
}

/// `ReduceMax(axes=[1])`：输出单列 f32 分数
pub(crate) fn max_score(output_name: &str) -> Vec<u8> {
    single_node_model(
        "ReduceMax",
        &[ints_attribute("axes", &[1]), int_attribute("keepdims", 1)],
        output_name,
        FLOAT,
        &[1, 1],
    )
}

pub(crate) fn write(dir: &Path, file_name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(file_name);
    fs::write(&path, bytes).unwrap();
    path
}
