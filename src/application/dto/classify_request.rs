// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 分类请求数据传输对象
#[derive(Debug, Deserialize, Serialize, Validate, Clone)]
pub struct ClassifyRequestDto {
    /// 待检测的网站 URL
    #[validate(length(min = 1, max = 2048))]
    pub url: String,
    /// 模型名称
    #[validate(length(min = 1, max = 128))]
    pub model: String,
}
