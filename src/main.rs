use anyhow::{bail, Result};
use frlens::analysis::{validate_sentence, Analyzer, OpenAiClient, ReplayAnalyzer};
use frlens::{report, terminal, utils, App, Config};
use std::io::{self, IsTerminal};
use std::path::PathBuf;

const HELP: &str = "\
frlens - French sentence structure viewer

USAGE:
  frlens [OPTIONS] [SENTENCE]

OPTIONS:
  -h, --help            Print help
  -V, --version         Print version
  --debug               Enable debug logging
  --plain               Print a one-shot report instead of starting the TUI
  --replay <FILE>       Read a saved analysis response instead of calling the service
  --model <NAME>        Model name (default: gpt-4o-mini, env FRLENS_MODEL)
  --base-url <URL>      Service base URL (env OPENAI_BASE_URL)
  --timeout <SECS>      Request timeout in seconds (default: 30)

ENVIRONMENT:
  OPENAI_API_KEY        API key for the analysis service

KEYBOARD SHORTCUTS:

  Input:
    Enter               Analyze structure
    Ctrl+L              Clear input
    Tab / Down          Select highlighted words

  Sentence:
    Left / Right        Previous / next highlighted word
    Tab / Shift+Tab     Next / previous highlighted word
    Enter / Space       Expand word details
    Esc / Up            Back to input

  Ctrl+Q                Quit
";

#[derive(Debug)]
struct Args {
    debug: bool,
    plain: bool,
    replay: Option<PathBuf>,
    model: Option<String>,
    base_url: Option<String>,
    timeout: Option<u64>,
    sentence: Option<String>,
}

fn parse_args() -> Result<Option<Args>> {
    let mut pargs = pico_args::Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{}", HELP);
        return Ok(None);
    }
    if pargs.contains(["-V", "--version"]) {
        println!("frlens {}", env!("CARGO_PKG_VERSION"));
        return Ok(None);
    }

    let mut args = Args {
        debug: pargs.contains("--debug"),
        plain: pargs.contains("--plain"),
        replay: pargs.opt_value_from_str("--replay")?,
        model: pargs.opt_value_from_str("--model")?,
        base_url: pargs.opt_value_from_str("--base-url")?,
        timeout: pargs.opt_value_from_str("--timeout")?,
        sentence: None,
    };

    // 剩下的參數組成句子，未知選項直接報錯
    let mut words = Vec::new();
    for arg in pargs.finish() {
        let word = arg.to_string_lossy().into_owned();
        if word.starts_with('-') && word.len() > 1 {
            bail!("unknown option: {}", word);
        }
        words.push(word);
    }
    if !words.is_empty() {
        args.sentence = Some(words.join(" "));
    }

    Ok(Some(args))
}

fn build_config(args: &Args) -> Config {
    let mut config = Config::from_env();
    if let Some(model) = &args.model {
        config.model = model.clone();
    }
    if let Some(url) = &args.base_url {
        config.base_url = url.clone();
    }
    if let Some(timeout) = args.timeout {
        config.timeout_secs = timeout;
    }
    config
}

fn build_analyzer(args: &Args, config: &Config) -> Result<Box<dyn Analyzer>> {
    match &args.replay {
        Some(path) => Ok(Box::new(ReplayAnalyzer::new(path))),
        None => Ok(Box::new(OpenAiClient::new(config)?)),
    }
}

/// 分析一次並輸出報告，失敗時回傳結束碼 1
fn run_plain(analyzer: &dyn Analyzer, config: &Config, sentence: &str) -> Result<i32> {
    let outcome =
        validate_sentence(sentence, config.max_chars).and_then(|s| analyzer.analyze(s));

    match outcome {
        Ok(result) => {
            let color = io::stdout().is_terminal();
            report::write_report(&mut io::stdout().lock(), &result, color)?;
            Ok(0)
        }
        Err(err) => {
            log::error!("analysis failed: {}", err);
            eprintln!("{}", err.user_message());
            Ok(1)
        }
    }
}

fn main() -> Result<()> {
    let Some(args) = parse_args()? else {
        return Ok(());
    };

    // 初始化日誌
    utils::init_logger(args.debug);

    let config = build_config(&args);
    let analyzer = build_analyzer(&args, &config)?;

    if args.plain {
        let Some(sentence) = args.sentence.as_deref() else {
            bail!("--plain requires a SENTENCE");
        };
        let code = run_plain(analyzer.as_ref(), &config, sentence)?;
        if code != 0 {
            std::process::exit(code);
        }
        return Ok(());
    }

    // 設置 panic hook 以確保終端正常恢復
    terminal::install_panic_hook();

    let mut app = App::new(analyzer, config, args.sentence.as_deref())?;
    app.run()?;

    Ok(())
}
