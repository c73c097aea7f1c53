use crate::firmware::types::RadioState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuCommand {
    Status,
    ToggleRadio,
    ToggleAp,
    ClearCredentials,
    SetCredentials,
    SetDhcp,
    SetStatic,
    ToggleCloud,
    TestDns,
    FixDns,
}

impl MenuCommand {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::ToggleRadio => "toggle_radio",
            Self::ToggleAp => "toggle_ap",
            Self::ClearCredentials => "clear_credentials",
            Self::SetCredentials => "set_credentials",
            Self::SetDhcp => "set_dhcp",
            Self::SetStatic => "set_static",
            Self::ToggleCloud => "toggle_cloud",
            Self::TestDns => "test_dns",
            Self::FixDns => "fix_dns",
        }
    }

    /// Whether the menu lists the entry. Hidden entries still run when
    /// typed and report why they cannot.
    pub const fn is_offered(self, state: RadioState, dns_bad: bool) -> bool {
        match self {
            Self::Status | Self::ToggleRadio => true,
            Self::ToggleAp
            | Self::ToggleCloud
            | Self::ClearCredentials
            | Self::SetCredentials
            | Self::SetDhcp
            | Self::SetStatic => state.radio_enabled,
            Self::TestDns => state.ap_connected,
            Self::FixDns => state.ap_connected && dns_bad,
        }
    }
}

const STANDARD_COMMANDS: [MenuCommand; 6] = [
    MenuCommand::Status,
    MenuCommand::ToggleRadio,
    MenuCommand::ToggleAp,
    MenuCommand::ToggleCloud,
    MenuCommand::TestDns,
    MenuCommand::FixDns,
];

const EXPERT_COMMANDS: [MenuCommand; 10] = [
    MenuCommand::Status,
    MenuCommand::ToggleRadio,
    MenuCommand::ToggleAp,
    MenuCommand::ClearCredentials,
    MenuCommand::SetCredentials,
    MenuCommand::SetDhcp,
    MenuCommand::SetStatic,
    MenuCommand::ToggleCloud,
    MenuCommand::TestDns,
    MenuCommand::FixDns,
];

/// Numbering of the menu. The key of a command is its index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuLayout {
    Standard,
    Expert,
}

impl MenuLayout {
    pub const fn from_features() -> Self {
        if cfg!(feature = "expert-mode") {
            Self::Expert
        } else {
            Self::Standard
        }
    }

    pub const fn commands(self) -> &'static [MenuCommand] {
        match self {
            Self::Standard => &STANDARD_COMMANDS,
            Self::Expert => &EXPERT_COMMANDS,
        }
    }

    pub fn command_for_key(self, key: u8) -> Option<MenuCommand> {
        self.commands().get(usize::from(key)).copied()
    }

    pub fn key_for(self, command: MenuCommand) -> Option<u8> {
        self.commands()
            .iter()
            .position(|candidate| *candidate == command)
            .and_then(|index| u8::try_from(index).ok())
    }
}
