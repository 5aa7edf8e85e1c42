// prompt.rs - 交互提问
//! 工作流需要用户回答时通过 Prompter 提问，返回 None 表示用户取消

use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use std::collections::VecDeque;
use tracing::warn;

/// 提问接口
pub trait Prompter {
    /// 从选项中选择一个
    fn select(&mut self, title: &str, options: &[String]) -> Option<String>;

    /// 输入文本，validate 返回 Some(提示) 表示输入无效
    fn input(&mut self, title: &str, validate: &dyn Fn(&str) -> Option<String>) -> Option<String>;

    /// 是 / 否
    fn confirm(&mut self, title: &str) -> Option<bool> {
        let options = vec!["Yes".to_string(), "No".to_string()];
        self.select(title, &options).map(|answer| answer == "Yes")
    }
}

/// 终端交互（dialoguer）：Esc 取消选择，空输入取消文本输入
#[derive(Default)]
pub struct InteractivePrompter {
    theme: ColorfulTheme,
}

impl InteractivePrompter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Prompter for InteractivePrompter {
    fn select(&mut self, title: &str, options: &[String]) -> Option<String> {
        if options.is_empty() {
            return None;
        }

        let selection = Select::with_theme(&self.theme)
            .with_prompt(title)
            .items(options)
            .default(0)
            .interact_opt();

        match selection {
            Ok(picked) => picked.and_then(|idx| options.get(idx).cloned()),
            Err(e) => {
                warn!(error = %e, "读取选择失败");
                None
            }
        }
    }

    fn input(&mut self, title: &str, validate: &dyn Fn(&str) -> Option<String>) -> Option<String> {
        let answer = Input::<String>::with_theme(&self.theme)
            .with_prompt(title)
            .allow_empty(true)
            .validate_with(|value: &String| -> Result<(), String> {
                if value.trim().is_empty() {
                    return Ok(());
                }
                match validate(value) {
                    Some(message) => Err(message),
                    None => Ok(()),
                }
            })
            .interact_text();

        match answer {
            Ok(value) if value.trim().is_empty() => None,
            Ok(value) => Some(value),
            Err(e) => {
                warn!(error = %e, "读取输入失败");
                None
            }
        }
    }

    fn confirm(&mut self, title: &str) -> Option<bool> {
        let answer = Confirm::with_theme(&self.theme)
            .with_prompt(title)
            .default(false)
            .interact_opt();

        match answer {
            Ok(answer) => answer,
            Err(e) => {
                warn!(error = %e, "读取确认失败");
                None
            }
        }
    }
}

/// 预设答案，按顺序回答；答案用完或为 None 时视为取消
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Option<String>>,
    /// 记录被问到的问题
    pub asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(|a| a.map(Into::into)).collect(),
            asked: Vec::new(),
        }
    }

    fn next(&mut self, title: &str) -> Option<String> {
        self.asked.push(title.to_string());
        self.answers.pop_front().flatten()
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&mut self, title: &str, options: &[String]) -> Option<String> {
        let answer = self.next(title)?;
        options.iter().find(|o| **o == answer).cloned()
    }

    fn input(&mut self, title: &str, validate: &dyn Fn(&str) -> Option<String>) -> Option<String> {
        // 无效答案被跳过，相当于用户重新输入
        loop {
            let answer = self.next(title)?;
            if validate(&answer).is_none() {
                return Some(answer);
            }
        }
    }
}
