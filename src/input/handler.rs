/// 目前接收按鍵的區域
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// 輸入框
    Input,
    /// 已分析的句子（在高亮詞之間移動）
    Sentence,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // 輸入框編輯
    Insert(char),
    Backspace,
    ClearInput,

    // 送出分析
    Analyze,

    // 焦點切換
    FocusSentence,
    FocusInput,

    // 高亮詞導覽
    NextKeyword,
    PrevKeyword,
    OpenDetail,

    // 視窗大小改變
    Resize,

    // 清除訊息
    ClearMessage,

    Quit,
}
