use crate::analysis::{validate_sentence, Analyzer};
use crate::config::Config;
use crate::dialog;
use crate::highlight::highlighted;
use crate::input::{handle_key_event, Command, Focus};
use crate::model::{AnalysisResult, KeywordAnnotation};
use crate::terminal::Terminal;
use crate::view::View;
use anyhow::Result;

/// 畫面狀態（不含終端），所有按鍵行為都在這裡
#[derive(Debug)]
pub struct AppState {
    pub input: String,
    pub focus: Focus,
    pub result: Option<AnalysisResult>,
    /// 目前選取第幾個高亮片段
    pub selected: usize,
    /// 錯誤列訊息
    pub error: Option<String>,
    /// 狀態列訊息
    pub message: Option<String>,
    pub loading: bool,
    max_chars: usize,
}

impl AppState {
    pub fn new(max_chars: usize) -> Self {
        Self {
            input: String::new(),
            focus: Focus::Input,
            result: None,
            selected: 0,
            error: None,
            message: None,
            loading: false,
            max_chars,
        }
    }

    /// 預先填入輸入框（超過上限的部分截掉）
    pub fn with_input(mut self, input: &str) -> Self {
        self.input = input.chars().take(self.max_chars).collect();
        self
    }

    pub fn insert(&mut self, ch: char) {
        self.focus = Focus::Input;
        if ch == '\n' || ch == '\r' {
            return;
        }
        // 與網頁輸入框相同：到達上限後不再接受輸入
        if self.input.chars().count() < self.max_chars {
            self.input.push(ch);
        }
    }

    pub fn backspace(&mut self) {
        self.focus = Focus::Input;
        self.input.pop();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
        self.focus = Focus::Input;
    }

    /// 輸入框是否有可送出的內容
    pub fn can_analyze(&self) -> bool {
        !self.loading && !self.input.trim().is_empty()
    }

    /// 送出分析；失敗時清除上一次結果並顯示錯誤
    pub fn analyze<A: Analyzer + ?Sized>(&mut self, analyzer: &A) {
        if self.input.trim().is_empty() {
            return;
        }

        self.result = None;
        self.error = None;
        self.message = None;
        self.selected = 0;
        self.focus = Focus::Input;

        let outcome = validate_sentence(&self.input, self.max_chars)
            .and_then(|sentence| analyzer.analyze(sentence));

        match outcome {
            Ok(result) => {
                let count = result.segments().iter().filter(|s| s.is_highlighted()).count();
                log::debug!(
                    "analysis returned {} keywords, {} highlights",
                    result.keywords.len(),
                    count
                );
                self.result = Some(result);
                if count > 0 {
                    self.focus = Focus::Sentence;
                }
            }
            Err(err) => {
                log::error!("analysis failed: {}", err);
                self.error = Some(err.user_message());
            }
        }
    }

    /// 目前句子中高亮片段的數量
    pub fn highlight_count(&self) -> usize {
        self.result
            .as_ref()
            .map(|r| highlighted(&r.segments()).count())
            .unwrap_or(0)
    }

    pub fn focus_sentence(&mut self) {
        if self.highlight_count() > 0 {
            self.focus = Focus::Sentence;
        } else {
            self.message = Some("No highlighted words".to_string());
        }
    }

    pub fn next_keyword(&mut self) {
        let count = self.highlight_count();
        if count > 0 {
            self.selected = (self.selected + 1) % count;
        }
    }

    pub fn prev_keyword(&mut self) {
        let count = self.highlight_count();
        if count > 0 {
            self.selected = if self.selected == 0 {
                count - 1
            } else {
                self.selected - 1
            };
        }
    }

    /// 選取的高亮片段所指向的關鍵詞
    pub fn selected_annotation(&self) -> Option<&KeywordAnnotation> {
        let result = self.result.as_ref()?;
        let segments = result.segments();
        let annotation = highlighted(&segments).nth(self.selected)?.annotation();
        annotation
    }
}

pub struct App<A: Analyzer> {
    analyzer: A,
    config: Config,
    state: AppState,
    view: View,
    terminal: Terminal,
    should_quit: bool,
}

impl<A: Analyzer> App<A> {
    pub fn new(analyzer: A, config: Config, initial_input: Option<&str>) -> Result<Self> {
        let terminal = Terminal::new()?;
        let view = View::new(&terminal);
        let mut state = AppState::new(config.max_chars);
        if let Some(input) = initial_input {
            state = state.with_input(input);
        }

        Ok(Self {
            analyzer,
            config,
            state,
            view,
            terminal,
            should_quit: false,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        Terminal::enter_raw_mode()?;
        Terminal::clear_screen()?;

        while !self.should_quit {
            self.view.render(&self.state, &self.config)?;

            let key_event = Terminal::read_key()?;

            if let Some(command) = handle_key_event(key_event, self.state.focus) {
                self.handle_command(command)?;
            }
        }

        Terminal::exit_raw_mode()?;
        Ok(())
    }

    fn resize(&mut self) -> Result<()> {
        self.terminal.update_size()?;
        self.view.update_size(&self.terminal);
        Terminal::clear_screen()
    }

    fn handle_command(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Insert(ch) => self.state.insert(ch),
            Command::Backspace => self.state.backspace(),
            Command::ClearInput => self.state.clear_input(),

            Command::Analyze => {
                if self.state.can_analyze() {
                    // 先畫出載入狀態，請求期間不讀取按鍵
                    self.state.loading = true;
                    self.view.render(&self.state, &self.config)?;
                    self.state.loading = false;

                    self.state.analyze(&self.analyzer);
                    Terminal::clear_screen()?;
                }
            }

            Command::FocusSentence => self.state.focus_sentence(),
            Command::FocusInput => self.state.focus = Focus::Input,
            Command::NextKeyword => self.state.next_keyword(),
            Command::PrevKeyword => self.state.prev_keyword(),

            Command::OpenDetail => {
                if let Some(annotation) = self.state.selected_annotation() {
                    dialog::show_detail(annotation, self.terminal.size())?;
                    // 對話框開啟期間可能改變過視窗大小
                    self.resize()?;
                }
            }

            Command::Resize => self.resize()?,

            Command::ClearMessage => {
                self.state.message = None;
                self.state.error = None;
            }

            Command::Quit => self.should_quit = true,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AnalysisError;
    use crate::model::KeywordType;
    use std::cell::RefCell;

    /// 記錄收到的句子並回傳固定結果
    struct FakeAnalyzer {
        result: Result<AnalysisResult, String>,
        calls: RefCell<Vec<String>>,
    }

    impl FakeAnalyzer {
        fn ok(sentence: &str, words: &[&str]) -> Self {
            let result = AnalysisResult {
                source_sentence: sentence.to_string(),
                keywords: words
                    .iter()
                    .map(|w| KeywordAnnotation::new(*w, KeywordType::Noun))
                    .collect(),
                ..AnalysisResult::default()
            };
            Self {
                result: Ok(result),
                calls: RefCell::new(Vec::new()),
            }
        }

        fn rejecting(message: &str) -> Self {
            Self {
                result: Err(message.to_string()),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl Analyzer for FakeAnalyzer {
        fn analyze(&self, sentence: &str) -> Result<AnalysisResult, AnalysisError> {
            self.calls.borrow_mut().push(sentence.to_string());
            self.result
                .clone()
                .map_err(AnalysisError::Rejected)
        }
    }

    fn typed(text: &str) -> AppState {
        let mut state = AppState::new(100);
        for ch in text.chars() {
            state.insert(ch);
        }
        state
    }

    #[test]
    fn test_input_limit() {
        let mut state = AppState::new(5);
        for ch in "Bonjour".chars() {
            state.insert(ch);
        }
        assert_eq!(state.input, "Bonjo");

        let state = AppState::new(3).with_input("été chaud");
        assert_eq!(state.input, "été");
    }

    #[test]
    fn test_backspace_and_clear() {
        let mut state = typed("chat");
        state.backspace();
        assert_eq!(state.input, "cha");
        state.clear_input();
        assert!(state.input.is_empty());
        assert!(!state.can_analyze());
    }

    #[test]
    fn test_blank_input_not_sent() {
        let analyzer = FakeAnalyzer::ok("x", &[]);
        let mut state = typed("   ");
        state.analyze(&analyzer);
        assert!(analyzer.calls.borrow().is_empty());
        assert!(state.result.is_none());
    }

    #[test]
    fn test_analyze_success_focuses_sentence() {
        let analyzer = FakeAnalyzer::ok("Le chien voit le chien", &["chien", "voit"]);
        let mut state = typed(" Le chien voit le chien ");
        state.analyze(&analyzer);

        assert_eq!(analyzer.calls.borrow().as_slice(), ["Le chien voit le chien"]);
        assert_eq!(state.focus, Focus::Sentence);
        assert_eq!(state.highlight_count(), 3);
        assert_eq!(state.selected_annotation().unwrap().word, "chien");
    }

    #[test]
    fn test_keyword_navigation_wraps() {
        let analyzer = FakeAnalyzer::ok("Le chien voit le chien", &["chien", "voit"]);
        let mut state = typed("Le chien voit le chien");
        state.analyze(&analyzer);

        // 片段順序：chien, voit, chien
        state.next_keyword();
        assert_eq!(state.selected_annotation().unwrap().word, "voit");
        state.next_keyword();
        assert_eq!(state.selected_annotation().unwrap().word, "chien");
        state.next_keyword();
        assert_eq!(state.selected, 0);
        state.prev_keyword();
        assert_eq!(state.selected, 2);
    }

    #[test]
    fn test_selected_annotation_is_the_producing_one() {
        let analyzer = FakeAnalyzer::ok("pomme pommes", &["pomme", "pommes"]);
        let mut state = typed("pomme pommes");
        state.analyze(&analyzer);

        assert_eq!(state.highlight_count(), 2);
        state.next_keyword();
        let result = state.result.as_ref().unwrap();
        assert!(std::ptr::eq(
            state.selected_annotation().unwrap(),
            &result.keywords[0]
        ));
    }

    #[test]
    fn test_analyze_failure_clears_result() {
        let mut state = typed("Le chat");
        state.analyze(&FakeAnalyzer::ok("Le chat", &["chat"]));
        assert!(state.result.is_some());

        state.analyze(&FakeAnalyzer::rejecting("请仅输入法语句子。"));
        assert!(state.result.is_none());
        assert_eq!(state.error.as_deref(), Some("请仅输入法语句子。"));
        assert_eq!(state.focus, Focus::Input);
        assert_eq!(state.highlight_count(), 0);
        assert!(state.selected_annotation().is_none());
    }

    #[test]
    fn test_no_highlights_stays_in_input() {
        let mut state = typed("Bonjour");
        state.analyze(&FakeAnalyzer::ok("Bonjour", &["merci"]));
        assert_eq!(state.focus, Focus::Input);

        state.focus_sentence();
        assert_eq!(state.focus, Focus::Input);
        assert!(state.message.is_some());
    }

    #[test]
    fn test_typing_returns_to_input() {
        let mut state = typed("Le chat");
        state.analyze(&FakeAnalyzer::ok("Le chat", &["chat"]));
        assert_eq!(state.focus, Focus::Sentence);
        state.insert('!');
        assert_eq!(state.focus, Focus::Input);
        assert_eq!(state.input, "Le chat!");
    }
}
