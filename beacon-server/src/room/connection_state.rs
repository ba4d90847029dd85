/// Жизненный цикл подключения внутри хаба. Каждый переход выполняется не более одного раза.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Unjoined,
    Joined,
    Departed,
}
