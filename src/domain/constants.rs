pub const DEFAULT_ENDPOINT: &str = "https://api.pipefy.com/graphql";
pub const DEFAULT_PAGE_SIZE: u32 = 300;

pub const DEFAULT_PIPE_ID: &str = "303822738";
pub const DEFAULT_CATEGORY_FIELD: &str = "Componente -> Suporte a Sistemas";
pub const DEFAULT_ALLOWED_VALUES: [&str; 2] = ["Meu RH", "TOTVS Datasul"];
pub const DEFAULT_TERMINAL_PHASE: &str = "Concluído";
pub const DEFAULT_TRACKED_PHASES: [&str; 4] =
    ["Triagem", "Pendente", "Em atendimento", "Escalar o Chamado"];

pub const TOKEN_ENV: &str = "PIPEFY_KEY";
pub const ENDPOINT_ENV: &str = "PIPEFY_API_URL";

pub const CATEGORY_CHART_COLORS: [&str; 2] = ["blue", "green"];
pub const PHASE_CHART_COLORS: [&str; 5] = ["purple", "orange", "cyan", "red", "yellow"];
