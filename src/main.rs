use userload::error::AppResult;

fn main() -> AppResult<()> {
    userload::run()
}
