pub const APP_TITLE: &str = "Mail triage";
pub const PROMPT: &str = "> ";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

pub const HELP: &str = "\
Commands:
  text | pdf | txt          choose how to submit the email
  write <text>              set the email text (\\n for new lines)
  file <path>               choose a PDF or TXT file
  clear                     empty the current text or file
  dismiss                   hide the current input error
  submit                    send the email for classification
  history                   browse processed emails
  filter all|produtivo|improdutivo
  page <n> | next | prev    move through history pages
  new | back                return to the start screen
  help                      show this list
  quit                      leave";
