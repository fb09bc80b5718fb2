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

use axum::{extract::Extension, Json};
use validator::Validate;

use crate::{
    application::{
        dto::{
            classify_request::ClassifyRequestDto,
            classify_response::{ClassifyResponseDto, ModelListDto},
        },
        use_cases::classify_use_case::ClassifyUseCase,
    },
    engines::traits::ContentFetcher,
    presentation::errors::AppError,
};

/// 列出已加载的模型
pub async fn list_models<F>(
    Extension(use_case): Extension<ClassifyUseCase<F>>,
) -> Json<ModelListDto>
where
    F: ContentFetcher + 'static,
{
    Json(ModelListDto {
        models: use_case.list_model_names(),
    })
}

/// 对 URL 进行钓鱼检测
///
/// # 参数
///
/// * `use_case` - 分类用例
/// * `payload` - 请求体，包含 URL 和模型名称
///
/// # 返回值
///
/// * `Ok(Json<ClassifyResponseDto>)` - 分类结论与特征向量
/// * `Err(AppError)` - 请求无效、模型不存在或推理失败
pub async fn classify<F>(
    Extension(use_case): Extension<ClassifyUseCase<F>>,
    Json(payload): Json<ClassifyRequestDto>,
) -> Result<Json<ClassifyResponseDto>, AppError>
where
    F: ContentFetcher + 'static,
{
    payload.validate()?;

    let outcome = use_case
        .classify_detailed(&payload.url, &payload.model)
        .await?;

    Ok(Json(outcome.into()))
}
