mod dispatcher;
mod storage;
