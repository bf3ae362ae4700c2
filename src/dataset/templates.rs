//! Instruction/output wording for the two task families.

use crate::core::SymbolRecord;
use crate::dataset::sample::Language;

/// Filled-in text for one sample: prompt, answer and `(goal, conclusion)`
/// pairs for the reasoning trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleText {
    pub instruction: String,
    pub output: String,
    pub steps: Vec<(String, String)>,
}

/// Fact question about what a symbol does, answered from its docstring.
pub fn fact_qa(language: Language, record: &SymbolRecord, repo: &str) -> SampleText {
    let path = &record.path;
    let name = &record.name;
    let doc_first = record.doc_first_line();
    let line = record.start_line;

    match language {
        Language::Zh => SampleText {
            instruction: format!(
                "在 {repo} 项目中，`{path}` 文件里的 `{name}` 主要负责什么功能？请根据代码与文档注释回答。"
            ),
            output: format!(
                "`{name}`（位于 `{path}`）的主要职责可以从其 docstring 与实现片段看出：\n\
                 - 核心描述：{doc_first}\n\n\
                 证据：该定义出现在文件 `{path}` 的第 {line} 行附近。"
            ),
            steps: vec![
                (
                    "定位目标符号的定义与职责描述".to_string(),
                    format!("在 `{path}` 中找到 `{name}` 的定义及 docstring。"),
                ),
                (
                    "基于 docstring/实现总结其主要功能".to_string(),
                    format!("docstring 的首句可作为 `{name}` 职责的高置信摘要。"),
                ),
            ],
        },
        Language::En => SampleText {
            instruction: format!(
                "In the {repo} project, what is `{name}` in `{path}` mainly responsible for? \
                 Answer from the code and its docstring."
            ),
            output: format!(
                "The responsibility of `{name}` (in `{path}`) can be read from its docstring and implementation snippet:\n\
                 - Core description: {doc_first}\n\n\
                 Evidence: the definition appears around line {line} of `{path}`."
            ),
            steps: vec![
                (
                    "Locate the definition and documented responsibility of the target symbol"
                        .to_string(),
                    format!("Found the definition of `{name}` and its docstring in `{path}`."),
                ),
                (
                    "Summarize its main function from the docstring and implementation".to_string(),
                    format!(
                        "The first sentence of the docstring is a high-confidence summary of what `{name}` does."
                    ),
                ),
            ],
        },
    }
}

/// Backward-compatible extension plan for a symbol.
pub fn design(language: Language, record: &SymbolRecord) -> SampleText {
    let path = &record.path;
    let name = &record.name;
    let line = record.start_line;

    match language {
        Language::Zh => SampleText {
            instruction: format!(
                "设计题：假设需要让 `{name}` 支持一种新的输入数据格式/字段，但要求不破坏现有调用方。\
                 请基于当前代码结构给出可实施的扩展方案，并指出可能修改的文件与位置。"
            ),
            output: format!(
                "基于 `{path}` 中 `{name}` 的职责（见 docstring 与实现片段），在保持向后兼容的前提下可采用：\n\
                 1) 接口兼容：保留现有入参/返回契约，在内部引入“适配层/解析函数”处理新格式。\n\
                 2) 扩展点隔离：将新格式解析逻辑封装为独立函数/类，避免把分支逻辑散落在主流程。\n\
                 3) 渐进式切换：为新格式增加单测与示例；必要时在文档中声明支持范围。\n\
                 4) 修改位置：优先在 `{path}` 的 `{name}` 定义附近（约第 {line} 行）扩展解析与分派逻辑；\
                 如存在调用链入口（CLI/管线），同步更新其输入校验与参数说明。\n"
            ),
            steps: vec![
                (
                    "确认当前组件职责与边界".to_string(),
                    format!("`{name}` 在 `{path}` 中承担特定处理职责，应在其边界内扩展。"),
                ),
                (
                    "提出兼容性优先的扩展策略".to_string(),
                    "通过适配层/解析函数新增支持，避免破坏现有契约与调用链。".to_string(),
                ),
            ],
        },
        Language::En => SampleText {
            instruction: format!(
                "Design task: suppose `{name}` must support a new input data format or field without \
                 breaking existing callers. Based on the current code structure, propose an \
                 implementable extension plan and point out the files and locations likely to change."
            ),
            output: format!(
                "Given the responsibility of `{name}` in `{path}` (see docstring and snippet), a backward-compatible approach is:\n\
                 1) Interface compatibility: keep the existing parameters and return contract, and add an internal adapter or parsing function for the new format.\n\
                 2) Isolated extension point: wrap the new parsing logic in its own function or class instead of scattering branches through the main flow.\n\
                 3) Incremental rollout: add unit tests and examples for the new format, and document the supported scope where needed.\n\
                 4) Edit location: extend parsing and dispatch near the definition of `{name}` in `{path}` (around line {line}); \
                 if a call-chain entry point exists (CLI or pipeline), update its input validation and parameter docs as well.\n"
            ),
            steps: vec![
                (
                    "Confirm the component's current responsibility and boundaries".to_string(),
                    format!(
                        "`{name}` carries a specific processing responsibility in `{path}` and should be extended within that boundary."
                    ),
                ),
                (
                    "Propose a compatibility-first extension strategy".to_string(),
                    "Add support through an adapter or parsing function so existing contracts and call chains stay intact."
                        .to_string(),
                ),
            ],
        },
    }
}
